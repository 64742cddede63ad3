use super::*;

/// Tests that consecutive pages are disjoint and cover every row.
///
/// Expected: Ok with pages of 2, 2 and 1 items and total 5 on each page
#[tokio::test]
async fn pages_are_disjoint() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..5 {
        factory::create_organization(db).await?;
    }

    let repo = OrganizationRepository::new(db);
    let mut seen = Vec::new();
    for (offset, expected) in [(0, 2), (2, 2), (4, 1)] {
        let page = repo
            .get_paginated(
                OrganizationFilter::default(),
                Pagination::new(Some(2), Some(offset)),
            )
            .await?;
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), expected);
        for org in page.items {
            assert!(!seen.contains(&org.id));
            seen.push(org.id);
        }
    }

    assert_eq!(seen.len(), 5);

    Ok(())
}

/// Tests filtering by status.
///
/// Expected: Ok with only suspended organizations
#[tokio::test]
async fn filters_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_organization(db).await?;
    let suspended = factory::organization::OrganizationFactory::new(db)
        .status("suspended")
        .build()
        .await?;

    let repo = OrganizationRepository::new(db);
    let page = repo
        .get_paginated(
            OrganizationFilter {
                status: Some(OrganizationStatus::Suspended),
            },
            Pagination::default(),
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, suspended.id);

    Ok(())
}
