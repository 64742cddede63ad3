use super::*;
use crate::server::{
    data::job::JobRepository,
    model::job::{EnqueueJobParams, JobKind, JobStatus},
    service::job::{JobService, JobWorker},
};

mod lifecycle;
mod worker;
