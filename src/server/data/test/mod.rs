mod address;
mod hierarchy;
mod job;
mod notification;
mod organization;
mod post;
mod rbac;
mod role;
mod user;
