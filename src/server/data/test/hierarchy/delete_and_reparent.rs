use super::*;

/// Tests that deleting a middle node moves its children to the grandparent.
///
/// Expected: Ok with the leaf now parented by the root
#[tokio::test]
async fn moves_children_to_grandparent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let chain = factory::helpers::create_organization_chain(db, 3).await?;

    let repo = HierarchyRepository::<entity::organization::Entity>::new(db);
    repo.delete_and_reparent(chain[1].id, Some(chain[0].id))
        .await?;

    assert!(repo.find_live(chain[1].id).await?.is_none());
    let leaf = repo.find_live(chain[2].id).await?.unwrap();
    assert_eq!(leaf.parent_id, Some(chain[0].id));

    Ok(())
}
