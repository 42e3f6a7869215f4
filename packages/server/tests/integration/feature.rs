use serde_json::json;

use crate::common::{TestApp, routes};

mod creation {
    use super::*;

    #[tokio::test]
    async fn creates_a_feature_definition() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::FEATURES, &json!({"name": "Venue", "type": "text"}))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["name"], "Venue");
        assert_eq!(res.body["type"], "text");
        assert!(res.body["id"].as_str().is_some());
    }

    #[tokio::test]
    async fn rejects_empty_name() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::FEATURES, &json!({"name": "   ", "type": "number"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_unknown_kind() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::FEATURES, &json!({"name": "Venue", "type": "color"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn does_not_retroactively_populate_existing_olimpiads() {
        let app = TestApp::spawn().await;
        let id = app.create_olimpiad("IMO", "Mathematics", "upcoming").await;

        app.create_feature("Venue", "text").await;

        let res = app.get(&routes::olimpiad(&id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["feature_values"], json!({}));
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn lists_features_in_creation_order() {
        let app = TestApp::spawn().await;
        app.create_feature("Venue", "text").await;
        app.create_feature("Logo", "image").await;
        app.create_feature("Prize pool", "number").await;

        let res = app.get(routes::FEATURES).await;

        assert_eq!(res.status, 200);
        let names: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Venue", "Logo", "Prize pool"]);
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn deletes_a_feature_and_removes_it_from_the_list() {
        let app = TestApp::spawn().await;
        let feature_id = app.create_feature("Venue", "text").await;

        let res = app.delete(&routes::feature(&feature_id)).await;
        assert_eq!(res.status, 204);

        let list = app.get(routes::FEATURES).await;
        assert_eq!(list.body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn cascades_to_every_olimpiad_holding_a_value() {
        let app = TestApp::spawn().await;
        let a = app.create_olimpiad("IMO", "Mathematics", "upcoming").await;
        let b = app.create_olimpiad("IPhO", "Physics", "upcoming").await;
        let feature_id = app.create_feature("Venue", "text").await;

        app.put(
            &routes::olimpiad_feature(&a, &feature_id),
            &json!({"value": "Sirius"}),
        )
        .await;
        app.put(
            &routes::olimpiad_feature(&b, &feature_id),
            &json!({"value": "CERN"}),
        )
        .await;

        let res = app.delete(&routes::feature(&feature_id)).await;
        assert_eq!(res.status, 204);

        for id in [&a, &b] {
            let record = app.get(&routes::olimpiad(id)).await;
            assert_eq!(record.status, 200);
            assert_eq!(record.body["feature_values"], json!({}));
        }
    }

    #[tokio::test]
    async fn returns_not_found_for_unknown_feature() {
        let app = TestApp::spawn().await;

        let res = app
            .delete(&routes::feature("00000000-0000-0000-0000-000000000000"))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}
