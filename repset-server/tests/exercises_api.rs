use anyhow::Result;
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

mod support;
use support::{ScriptedSearch, build_test_server};

#[sqlx::test(migrator = "repset_core::MIGRATOR")]
async fn raw_insert_then_lookup_by_id_and_title(pool: PgPool) -> Result<()> {
    let server = build_test_server(pool, ScriptedSearch::new())?;

    let response = server
        .post("/exercise")
        .json(&json!({
            "title": "Bench Press",
            "type": "Strength",
            "rating": 9.4,
            "unknown_field": true,
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    let id = body["inserted_id"].as_str().expect("inserted_id").to_string();

    let response = server.get(&format!("/exercises/{id}")).await;
    response.assert_status_ok();
    let fetched: Value = response.json();
    assert_eq!(fetched["title"], "Bench Press");
    assert_eq!(fetched["type"], "Strength");
    assert_eq!(fetched["rating"], 9.4);
    assert!(fetched.get("unknown_field").is_none());

    // Lookup is punctuation- and case-insensitive on the normalized form.
    let response = server
        .get("/exercises/title")
        .add_query_param("title", "  bench-press!!  ")
        .await;
    response.assert_status_ok();
    let by_title: Value = response.json();
    assert_eq!(by_title["id"].as_str(), Some(id.as_str()));

    Ok(())
}

#[sqlx::test(migrator = "repset_core::MIGRATOR")]
async fn malformed_id_is_validation_not_not_found(pool: PgPool) -> Result<()> {
    let server = build_test_server(pool, ScriptedSearch::new())?;

    let response = server.get("/exercises/not-a-uuid").await;
    response.assert_status_bad_request();

    let response = server.get(&format!("/exercises/{}", Uuid::now_v7())).await;
    response.assert_status_not_found();

    Ok(())
}

#[sqlx::test(migrator = "repset_core::MIGRATOR")]
async fn unknown_title_is_not_found(pool: PgPool) -> Result<()> {
    let server = build_test_server(pool, ScriptedSearch::new())?;

    let response = server
        .get("/exercises/title")
        .add_query_param("title", "no such exercise")
        .await;
    response.assert_status_not_found();

    Ok(())
}

#[sqlx::test(migrator = "repset_core::MIGRATOR")]
async fn titles_come_back_sorted(pool: PgPool) -> Result<()> {
    let server = build_test_server(pool, ScriptedSearch::new())?;

    for title in ["Squat", "Bench Press", "Deadlift"] {
        server
            .post("/exercise")
            .json(&json!({ "title": title }))
            .await
            .assert_status_ok();
    }

    let response = server.get("/titles").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body["titles"],
        json!(["Bench Press", "Deadlift", "Squat"])
    );

    let response = server.get("/exercises").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["exercises"].as_array().unwrap().len(), 3);

    Ok(())
}

#[sqlx::test(migrator = "repset_core::MIGRATOR")]
async fn update_gif_validates_before_touching_the_store(pool: PgPool) -> Result<()> {
    let server = build_test_server(pool, ScriptedSearch::new())?;

    let response = server
        .post("/exercise/update-gif")
        .json(&json!({ "id": "ignored" }))
        .await;
    response.assert_status_bad_request();

    let response = server
        .post("/exercise/update-gif")
        .json(&json!({ "id": "", "gifUrl": "https://a.test/x.gif" }))
        .await;
    response.assert_status_bad_request();

    let response = server
        .post("/exercise/update-gif")
        .json(&json!({ "id": "not-a-uuid", "gifUrl": "https://a.test/x.gif" }))
        .await;
    response.assert_status_bad_request();

    let response = server
        .post("/exercise/update-gif")
        .json(&json!({ "id": Uuid::now_v7().to_string(), "gifUrl": "https://a.test/x.gif" }))
        .await;
    response.assert_status_not_found();

    Ok(())
}

#[sqlx::test(migrator = "repset_core::MIGRATOR")]
async fn update_gif_persists_the_new_url(pool: PgPool) -> Result<()> {
    let server = build_test_server(pool, ScriptedSearch::new())?;

    let response = server
        .post("/exercise")
        .json(&json!({ "title": "Bench Press" }))
        .await;
    let id = response.json::<Value>()["inserted_id"]
        .as_str()
        .expect("inserted_id")
        .to_string();

    let response = server
        .post("/exercise/update-gif")
        .json(&json!({ "id": id, "gifUrl": "https://a.test/new.gif" }))
        .await;
    response.assert_status_ok();

    let fetched: Value = server.get(&format!("/exercises/{id}")).await.json();
    assert_eq!(fetched["gifUrl"], "https://a.test/new.gif");

    Ok(())
}
