use super::*;

/// Tests creating, finding and renaming a role.
///
/// Expected: Ok with the role retrievable by its new name
#[tokio::test]
async fn creates_and_renames_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RoleRepository::new(db);
    let role = repo
        .create(CreateRoleParams {
            name: "editor".to_string(),
            description: Some("Edits content".to_string()),
        })
        .await?;

    assert_eq!(repo.find_by_name("editor").await?.unwrap().id, role.id);

    let renamed = repo
        .update(
            role.id,
            UpdateRoleParams {
                name: Some("writer".to_string()),
                description: None,
            },
        )
        .await?
        .unwrap();
    assert_eq!(renamed.name, "writer");
    assert_eq!(renamed.description.as_deref(), Some("Edits content"));
    assert!(repo.find_by_name("editor").await?.is_none());

    Ok(())
}
