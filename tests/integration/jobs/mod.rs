//! Jobs endpoint integration tests

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::common::{request, TestApp};

fn titles(body: &Value) -> Vec<&str> {
    body["jobs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["title"].as_str().unwrap())
        .collect()
}

fn messages(body: &Value) -> Vec<String> {
    body["error"]["message"]
        .as_array()
        .expect("message should be a list")
        .iter()
        .map(|m| m.as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// POST /jobs
// ---------------------------------------------------------------------------

mod create {
    use super::*;

    #[tokio::test]
    async fn test_admin_creates_job() {
        let app = TestApp::new();
        let token = app.admin_token();

        let (status, body) = app
            .send(request(
                Method::POST,
                "/jobs",
                Some(&token),
                Some(json!({"title": "new", "salary": 10, "equity": "0.2", "companyHandle": "c1"})),
            ))
            .await;

        assert_eq!(status, StatusCode::CREATED);
        let id = body["job"]["id"].as_i64().unwrap();
        assert!(id > 0);
        assert_eq!(
            body,
            json!({"job": {"id": id, "title": "new", "salary": 10, "equity": "0.2", "companyHandle": "c1"}})
        );
        assert_eq!(app.store.jobs().len(), 1);
    }

    #[tokio::test]
    async fn test_ids_are_never_reassigned() {
        let (app, ids) = TestApp::seeded().await;
        let token = app.admin_token();

        let last = *ids.last().unwrap();
        let (status, _) = app
            .send(request(Method::DELETE, &format!("/jobs/{}", last), Some(&token), None))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = app
            .send(request(
                Method::POST,
                "/jobs",
                Some(&token),
                Some(json!({"title": "J5", "companyHandle": "c2"})),
            ))
            .await;
        let id = body["job"]["id"].as_i64().unwrap() as i32;
        assert!(ids.iter().all(|&old| old != id));
        assert!(id > last);
    }

    #[tokio::test]
    async fn test_missing_title_is_bad_request() {
        let app = TestApp::new();
        let token = app.admin_token();

        let (status, body) = app
            .send(request(
                Method::POST,
                "/jobs",
                Some(&token),
                Some(json!({"salary": 10, "companyHandle": "c1"})),
            ))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["status"], 400);
        assert!(!messages(&body).is_empty());
        assert!(app.store.jobs().is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields_and_bad_values_are_reported_together() {
        let app = TestApp::new();
        let token = app.admin_token();

        let (status, body) = app
            .send(request(
                Method::POST,
                "/jobs",
                Some(&token),
                Some(json!({"salary": -5})),
            ))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let messages = messages(&body);
        assert_eq!(messages.len(), 3, "{messages:?}");
        assert!(messages.contains(&"instance requires property \"title\"".to_string()));
        assert!(messages.contains(&"instance requires property \"companyHandle\"".to_string()));
        assert!(messages
            .iter()
            .any(|m| m.starts_with("instance.salary must be greater than or equal to")));
    }

    #[tokio::test]
    async fn test_client_supplied_id_is_rejected() {
        let app = TestApp::new();
        let token = app.admin_token();

        let (status, _) = app
            .send(request(
                Method::POST,
                "/jobs",
                Some(&token),
                Some(json!({"id": 77, "title": "t", "companyHandle": "c1"})),
            ))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_value_errors_are_reported_together() {
        let app = TestApp::new();
        let token = app.admin_token();

        let (status, body) = app
            .send(request(
                Method::POST,
                "/jobs",
                Some(&token),
                Some(json!({"title": "", "salary": -5, "equity": "1.5", "companyHandle": "c1"})),
            ))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let messages = messages(&body);
        assert_eq!(messages.len(), 3, "{messages:?}");
        assert!(messages.contains(&"instance.equity must be between 0 and 1".to_string()));
        assert!(messages.iter().any(|m| m.starts_with("instance.salary")));
        assert!(messages.iter().any(|m| m.starts_with("instance.title")));
    }

    #[tokio::test]
    async fn test_unknown_company_is_bad_request() {
        let app = TestApp::new();
        let token = app.admin_token();

        let (status, body) = app
            .send(request(
                Method::POST,
                "/jobs",
                Some(&token),
                Some(json!({"title": "t", "companyHandle": "nope"})),
            ))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(messages(&body), vec!["No company: nope"]);
    }

    #[tokio::test]
    async fn test_equity_boundaries_are_accepted() {
        let app = TestApp::new();
        let token = app.admin_token();

        for equity in ["0", "1", "1.0"] {
            let (status, _) = app
                .send(request(
                    Method::POST,
                    "/jobs",
                    Some(&token),
                    Some(json!({"title": "t", "equity": equity, "companyHandle": "c1"})),
                ))
                .await;
            assert_eq!(status, StatusCode::CREATED, "equity {equity}");
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = TestApp::new();
        let token = app.admin_token();

        let req = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/jobs")
            .header("authorization", format!("Bearer {}", token))
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{\"title\":"))
            .unwrap();
        let (status, body) = app.send(req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}

// ---------------------------------------------------------------------------
// GET /jobs
// ---------------------------------------------------------------------------

mod list {
    use super::*;

    #[tokio::test]
    async fn test_lists_all_jobs_with_company_name() {
        let (app, ids) = TestApp::seeded().await;

        let (status, body) = app.send(request(Method::GET, "/jobs", None, None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&body), vec!["J1", "J2", "J3", "J4"]);
        assert_eq!(
            body["jobs"][0],
            json!({
                "id": ids[0],
                "title": "J1",
                "salary": 1,
                "equity": "0.1",
                "companyHandle": "c1",
                "companyName": "C1",
            })
        );
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let app = TestApp::new();
        let (status, body) = app.send(request(Method::GET, "/jobs", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"jobs": []}));
    }

    #[tokio::test]
    async fn test_has_equity_true_filters_positive_equity() {
        let (app, _) = TestApp::seeded().await;
        let (status, body) = app
            .send(request(Method::GET, "/jobs?hasEquity=true", None, None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&body), vec!["J1", "J2"]);
    }

    #[tokio::test]
    async fn test_has_equity_other_values_do_not_filter() {
        let (app, _) = TestApp::seeded().await;
        for value in ["false", "yes", "TRUE", "1", ""] {
            let (status, body) = app
                .send(request(Method::GET, &format!("/jobs?hasEquity={}", value), None, None))
                .await;
            assert_eq!(status, StatusCode::OK, "hasEquity={value}");
            assert_eq!(titles(&body).len(), 4, "hasEquity={value}");
        }
    }

    #[tokio::test]
    async fn test_zero_equity_is_not_equity() {
        let app = TestApp::new();
        let token = app.admin_token();
        app.send(request(
            Method::POST,
            "/jobs",
            Some(&token),
            Some(json!({"title": "Zero", "equity": "0", "companyHandle": "c1"})),
        ))
        .await;

        let (_, body) = app
            .send(request(Method::GET, "/jobs?hasEquity=true", None, None))
            .await;
        assert!(titles(&body).is_empty());
    }

    #[tokio::test]
    async fn test_min_salary_filter() {
        let (app, _) = TestApp::seeded().await;
        let token = app.admin_token();
        app.send(request(
            Method::POST,
            "/jobs",
            Some(&token),
            Some(json!({"title": "Lead", "salary": 150000, "companyHandle": "c2"})),
        ))
        .await;

        let (_, body) = app
            .send(request(Method::GET, "/jobs?minSalary=2", None, None))
            .await;
        assert_eq!(titles(&body), vec!["J2", "J3", "Lead"]);

        let (_, body) = app
            .send(request(Method::GET, "/jobs?minSalary=100000", None, None))
            .await;
        assert_eq!(titles(&body), vec!["Lead"]);
        assert_eq!(body["jobs"][0]["companyName"], "C2");
    }

    #[tokio::test]
    async fn test_title_filter_is_case_insensitive_substring() {
        let (app, _) = TestApp::seeded().await;

        let (_, body) = app.send(request(Method::GET, "/jobs?title=j", None, None)).await;
        assert_eq!(titles(&body).len(), 4);

        let (_, body) = app.send(request(Method::GET, "/jobs?title=1", None, None)).await;
        assert_eq!(titles(&body), vec!["J1"]);

        let (_, body) = app
            .send(request(Method::GET, "/jobs?title=nothing", None, None))
            .await;
        assert!(titles(&body).is_empty());
    }

    #[tokio::test]
    async fn test_title_filter_matches_wildcards_literally() {
        let app = TestApp::new();
        let token = app.admin_token();
        for title in ["100% remote", "100 remote"] {
            app.send(request(
                Method::POST,
                "/jobs",
                Some(&token),
                Some(json!({"title": title, "companyHandle": "c1"})),
            ))
            .await;
        }

        let (_, body) = app
            .send(request(Method::GET, "/jobs?title=100%25", None, None))
            .await;
        assert_eq!(titles(&body), vec!["100% remote"]);
    }

    #[tokio::test]
    async fn test_filters_combine() {
        let (app, _) = TestApp::seeded().await;
        let (_, body) = app
            .send(request(
                Method::GET,
                "/jobs?minSalary=2&hasEquity=true&title=J",
                None,
                None,
            ))
            .await;
        assert_eq!(titles(&body), vec!["J2"]);
    }

    #[tokio::test]
    async fn test_non_integer_min_salary_is_bad_request() {
        let app = TestApp::new();
        let (status, body) = app
            .send(request(Method::GET, "/jobs?minSalary=lots", None, None))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            messages(&body),
            vec!["instance.minSalary is not of a type(s) integer"]
        );
    }

    #[tokio::test]
    async fn test_negative_min_salary_is_bad_request() {
        let app = TestApp::new();
        let (status, body) = app
            .send(request(Method::GET, "/jobs?minSalary=-1", None, None))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(messages(&body)[0].starts_with("instance.minSalary"));
    }

    #[tokio::test]
    async fn test_unknown_filter_is_bad_request() {
        let app = TestApp::new();
        let (status, body) = app
            .send(request(Method::GET, "/jobs?nope=nope", None, None))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            messages(&body),
            vec!["instance is not allowed to have the additional property \"nope\""]
        );
    }
}

// ---------------------------------------------------------------------------
// GET /jobs/{id}
// ---------------------------------------------------------------------------

mod get {
    use super::*;

    #[tokio::test]
    async fn test_gets_job_with_company_name() {
        let (app, ids) = TestApp::seeded().await;

        let (status, body) = app
            .send(request(Method::GET, &format!("/jobs/{}", ids[2]), None, None))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"job": {
                "id": ids[2],
                "title": "J3",
                "salary": 3,
                "equity": null,
                "companyHandle": "c1",
                "companyName": "C1",
            }})
        );
    }

    #[tokio::test]
    async fn test_missing_job_is_not_found() {
        let app = TestApp::new();
        let (status, body) = app.send(request(Method::GET, "/jobs/0", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"error": {"code": "NOT_FOUND", "message": "No job: 0", "status": 404}})
        );
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        let app = TestApp::new();
        let (status, body) = app.send(request(Method::GET, "/jobs/abc", None, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["status"], 400);
        assert_eq!(messages(&body).len(), 1);
    }
}

// ---------------------------------------------------------------------------
// PATCH /jobs/{id}
// ---------------------------------------------------------------------------

mod update {
    use super::*;

    #[tokio::test]
    async fn test_patch_changes_only_named_fields() {
        let (app, ids) = TestApp::seeded().await;
        let token = app.admin_token();

        let (status, body) = app
            .send(request(
                Method::PATCH,
                &format!("/jobs/{}", ids[0]),
                Some(&token),
                Some(json!({"salary": 99999})),
            ))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"job": {"id": ids[0], "title": "J1", "salary": 99999, "equity": "0.1", "companyHandle": "c1"}})
        );
    }

    #[tokio::test]
    async fn test_patch_null_clears_nullable_fields() {
        let (app, ids) = TestApp::seeded().await;
        let token = app.admin_token();

        let (status, body) = app
            .send(request(
                Method::PATCH,
                &format!("/jobs/{}", ids[1]),
                Some(&token),
                Some(json!({"salary": null, "equity": null, "title": "Renamed"})),
            ))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job"]["title"], "Renamed");
        assert_eq!(body["job"]["salary"], Value::Null);
        assert_eq!(body["job"]["equity"], Value::Null);

        let (_, body) = app
            .send(request(Method::GET, &format!("/jobs/{}", ids[1]), None, None))
            .await;
        assert_eq!(body["job"]["title"], "Renamed");
    }

    #[tokio::test]
    async fn test_empty_patch_is_bad_request() {
        let (app, ids) = TestApp::seeded().await;
        let token = app.admin_token();

        let (status, body) = app
            .send(request(
                Method::PATCH,
                &format!("/jobs/{}", ids[0]),
                Some(&token),
                Some(json!({})),
            ))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(messages(&body), vec!["No data"]);
    }

    #[tokio::test]
    async fn test_patch_cannot_change_id_or_company() {
        let (app, ids) = TestApp::seeded().await;
        let token = app.admin_token();

        for body in [json!({"id": 1000}), json!({"companyHandle": "c2"})] {
            let (status, _) = app
                .send(request(
                    Method::PATCH,
                    &format!("/jobs/{}", ids[0]),
                    Some(&token),
                    Some(body),
                ))
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }

        let job = app.store.jobs().into_iter().find(|j| j.id == ids[0]).unwrap();
        assert_eq!(job.company_handle, "c1");
    }

    #[tokio::test]
    async fn test_patch_invalid_values_are_bad_request() {
        let (app, ids) = TestApp::seeded().await;
        let token = app.admin_token();

        let (status, body) = app
            .send(request(
                Method::PATCH,
                &format!("/jobs/{}", ids[0]),
                Some(&token),
                Some(json!({"salary": "not-a-number"})),
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = app
            .send(request(
                Method::PATCH,
                &format!("/jobs/{}", ids[0]),
                Some(&token),
                Some(json!({"equity": "2"})),
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(messages(&body), vec!["instance.equity must be between 0 and 1"]);
    }

    #[tokio::test]
    async fn test_patch_null_title_is_bad_request() {
        let (app, ids) = TestApp::seeded().await;
        let token = app.admin_token();

        let (status, body) = app
            .send(request(
                Method::PATCH,
                &format!("/jobs/{}", ids[0]),
                Some(&token),
                Some(json!({"title": null, "salary": 5})),
            ))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(messages(&body), vec!["instance.title is not of a type(s) string"]);

        let job = app.store.jobs().into_iter().find(|j| j.id == ids[0]).unwrap();
        assert_eq!(job.salary, Some(1));
    }

    #[tokio::test]
    async fn test_patch_missing_job_is_not_found() {
        let app = TestApp::new();
        let token = app.admin_token();

        let (status, body) = app
            .send(request(
                Method::PATCH,
                "/jobs/0",
                Some(&token),
                Some(json!({"title": "new"})),
            ))
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "No job: 0");
    }
}

// ---------------------------------------------------------------------------
// DELETE /jobs/{id}
// ---------------------------------------------------------------------------

mod delete {
    use super::*;

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (app, ids) = TestApp::seeded().await;
        let token = app.admin_token();
        let uri = format!("/jobs/{}", ids[0]);

        let (status, body) = app
            .send(request(Method::DELETE, &uri, Some(&token), None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"deleted": ids[0]}));
        assert!(body["deleted"].is_number());

        let (status, _) = app.send(request(Method::GET, &uri, None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app
            .send(request(Method::DELETE, &uri, Some(&token), None))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_company_removal_cascades_to_jobs() {
        let (app, _) = TestApp::seeded().await;
        app.store.remove_company("c1");

        let (_, body) = app.send(request(Method::GET, "/jobs", None, None)).await;
        assert_eq!(body, json!({"jobs": []}));
    }
}
