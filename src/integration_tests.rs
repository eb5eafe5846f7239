// ABOUTME: Integration tests for the HTTP API
// ABOUTME: Tests complete request/response flows, authentication and error statuses

#[cfg(test)]
mod tests {
    use crate::auth;
    use crate::config::Config;
    use crate::entities::{acronym, category};
    use crate::storage::Storage;
    use crate::types::{AcronymPayload, LoginResponse, PublicUser};
    use crate::{app, AppState};
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;
    use uuid::Uuid;

    const ACRONYMS_URI: &str = "/api/acronyms";
    const PASSWORD: &str = "password";

    struct TestApp {
        server: TestServer,
        storage: Arc<Storage>,
        _temp_dir: TempDir,
    }

    async fn create_test_app() -> TestApp {
        create_test_app_with(Config::default()).await
    }

    async fn create_test_app_with(config: Config) -> TestApp {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite:{}?mode=rwc", temp_dir.path().join("test.db").display());

        let storage = Arc::new(Storage::new(&db_url).await.unwrap());
        let config = Config {
            database_url: db_url,
            ..config
        };

        let state = AppState {
            storage: storage.clone(),
            config: Arc::new(config),
        };

        TestApp {
            server: TestServer::new(app(state)).unwrap(),
            storage,
            _temp_dir: temp_dir,
        }
    }

    impl TestApp {
        async fn create_user(&self, username: &str) -> PublicUser {
            let hash = auth::hash_password(PASSWORD).unwrap();
            self.storage
                .create_user("Test User", username, &hash)
                .await
                .unwrap()
                .into()
        }

        async fn create_acronym(&self, short: &str, long: &str, user_id: Uuid) -> acronym::Model {
            self.storage
                .create_acronym(&AcronymPayload {
                    short: short.to_string(),
                    long: long.to_string(),
                    user_id,
                })
                .await
                .unwrap()
        }

        async fn login(&self, username: &str) -> String {
            let credentials = STANDARD.encode(format!("{username}:{PASSWORD}"));
            let response = self
                .server
                .post("/api/users/login")
                .add_header(header::AUTHORIZATION, basic(&credentials))
                .await;
            response.assert_status_ok();
            response.json::<LoginResponse>().token
        }

        async fn list_acronyms(&self) -> Vec<acronym::Model> {
            let response = self.server.get(ACRONYMS_URI).await;
            response.assert_status_ok();
            response.json()
        }
    }

    fn basic(credentials: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Basic {credentials}")).unwrap()
    }

    fn bearer(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
    }

    #[tokio::test]
    async fn test_acronyms_can_be_retrieved() {
        let app = create_test_app().await;
        let user = app.create_user("reader").await;
        let first = app.create_acronym("OMG", "Oh My God", user.id).await;
        app.create_acronym("LOL", "Laugh Out Loud", user.id).await;

        let acronyms = app.list_acronyms().await;
        assert_eq!(acronyms.len(), 2);
        assert_eq!(acronyms[0].id, first.id);
        assert_eq!(acronyms[0].short, "OMG");
        assert_eq!(acronyms[0].long, "Oh My God");

        // Trailing-slash form of the collection path
        let response = app.server.get("/api/acronyms/").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Vec<acronym::Model>>().len(), 2);
    }

    #[tokio::test]
    async fn test_acronym_can_be_saved_with_api() {
        let app = create_test_app().await;
        let user = app.create_user("saver").await;
        let token = app.login("saver").await;

        let response = app
            .server
            .post(ACRONYMS_URI)
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({"short": "OMG", "long": "Oh My God", "userID": user.id}))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["short"], "OMG");
        assert_eq!(body["long"], "Oh My God");
        assert_eq!(body["userID"], user.id.to_string());
        let created_id = body["id"].as_i64().unwrap();

        let acronyms = app.list_acronyms().await;
        assert_eq!(acronyms.len(), 1);
        assert_eq!(i64::from(acronyms[0].id), created_id);
        assert_eq!(acronyms[0].short, "OMG");
        assert_eq!(acronyms[0].long, "Oh My God");
        assert_eq!(acronyms[0].user_id, user.id);
    }

    #[tokio::test]
    async fn test_getting_a_single_acronym() {
        let app = create_test_app().await;
        let user = app.create_user("single").await;
        let acronym = app.create_acronym("OMG", "Oh My God", user.id).await;

        let response = app.server.get(&format!("{ACRONYMS_URI}/{}", acronym.id)).await;
        response.assert_status_ok();
        assert_eq!(response.json::<acronym::Model>(), acronym);

        let response = app.server.get(&format!("{ACRONYMS_URI}/{}", acronym.id + 1)).await;
        response.assert_status(StatusCode::NOT_FOUND);

        let response = app.server.get(&format!("{ACRONYMS_URI}/not-a-number")).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_updating_an_acronym() {
        let app = create_test_app().await;
        let user = app.create_user("original").await;
        let new_user = app.create_user("replacement").await;
        let acronym = app.create_acronym("OMG", "Oh My God", user.id).await;
        let token = app.login("replacement").await;

        let response = app
            .server
            .put(&format!("{ACRONYMS_URI}/{}", acronym.id))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({"short": "OMG", "long": "Oh My Gosh", "userID": new_user.id}))
            .await;
        response.assert_status_ok();

        let returned: acronym::Model = app
            .server
            .get(&format!("{ACRONYMS_URI}/{}", acronym.id))
            .await
            .json();
        assert_eq!(returned.short, "OMG");
        assert_eq!(returned.long, "Oh My Gosh");
        assert_eq!(returned.user_id, new_user.id);
    }

    #[tokio::test]
    async fn test_deleting_an_acronym() {
        let app = create_test_app().await;
        let user = app.create_user("deleter").await;
        let doomed = app.create_acronym("OMG", "Oh My God", user.id).await;
        app.create_acronym("LOL", "Laugh Out Loud", user.id).await;
        let token = app.login("deleter").await;

        assert_eq!(app.list_acronyms().await.len(), 2);

        let response = app
            .server
            .delete(&format!("{ACRONYMS_URI}/{}", doomed.id))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let remaining = app.list_acronyms().await;
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|a| a.id != doomed.id));

        let response = app
            .server
            .delete(&format!("{ACRONYMS_URI}/{}", doomed.id))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_searching_acronyms() {
        let app = create_test_app().await;
        let user = app.create_user("searcher").await;
        let acronym = app.create_acronym("OMG", "Oh My God", user.id).await;
        app.create_acronym("LOL", "Laugh Out Loud", user.id).await;

        for query in ["term=OMG", "term=Oh+My+God"] {
            let response = app.server.get(&format!("{ACRONYMS_URI}?{query}")).await;
            response.assert_status_ok();

            let found: Vec<acronym::Model> = response.json();
            assert_eq!(found.len(), 1, "query {query}");
            assert_eq!(found[0], acronym, "query {query}");
        }

        let found: Vec<acronym::Model> = app
            .server
            .get(&format!("{ACRONYMS_URI}?term=ROFL"))
            .await
            .json();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_getting_first_acronym() {
        let app = create_test_app().await;

        let response = app.server.get(&format!("{ACRONYMS_URI}/first")).await;
        response.assert_status(StatusCode::NOT_FOUND);

        let user = app.create_user("first").await;
        let acronym = app.create_acronym("OMG", "Oh My God", user.id).await;
        app.create_acronym("AAA", "Anything At All", user.id).await;
        app.create_acronym("ZZZ", "Sleeping", user.id).await;

        let response = app.server.get(&format!("{ACRONYMS_URI}/first")).await;
        response.assert_status_ok();
        assert_eq!(response.json::<acronym::Model>(), acronym);
    }

    #[tokio::test]
    async fn test_sorting_acronyms() {
        let app = create_test_app().await;
        let user = app.create_user("sorter").await;
        let omg = app.create_acronym("OMG", "Oh My God", user.id).await;
        let lol = app.create_acronym("LOL", "Laugh Out Loud", user.id).await;

        let sorted: Vec<acronym::Model> = app
            .server
            .get(&format!("{ACRONYMS_URI}/sorted"))
            .await
            .json();
        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted[0].id, lol.id);
        assert_eq!(sorted[1].id, omg.id);
    }

    #[tokio::test]
    async fn test_getting_an_acronyms_user() {
        let app = create_test_app().await;
        let user = app.create_user("owner").await;
        let acronym = app.create_acronym("OMG", "Oh My God", user.id).await;

        let response = app
            .server
            .get(&format!("{ACRONYMS_URI}/{}/user", acronym.id))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(
            body,
            json!({"id": user.id, "name": user.name, "username": user.username})
        );
    }

    #[tokio::test]
    async fn test_acronym_categories() {
        let app = create_test_app().await;
        let user = app.create_user("tagger").await;
        let token = app.login("tagger").await;
        let acronym = app.create_acronym("OMG", "Oh My God", user.id).await;
        let teenager = app.storage.create_category("Teenager").await.unwrap();
        let funny = app.storage.create_category("Funny").await.unwrap();

        for category in [&teenager, &funny] {
            let response = app
                .server
                .post(&format!("{ACRONYMS_URI}/{}/categories/{}", acronym.id, category.id))
                .add_header(header::AUTHORIZATION, bearer(&token))
                .await;
            response.assert_status(StatusCode::CREATED);
        }

        let categories: Vec<category::Model> = app
            .server
            .get(&format!("{ACRONYMS_URI}/{}/categories", acronym.id))
            .await
            .json();
        assert_eq!(categories, vec![teenager.clone(), funny.clone()]);

        let tagged: Vec<acronym::Model> = app
            .server
            .get(&format!("/api/categories/{}/acronyms", funny.id))
            .await
            .json();
        assert_eq!(tagged, vec![acronym.clone()]);

        let response = app
            .server
            .delete(&format!("{ACRONYMS_URI}/{}/categories/{}", acronym.id, teenager.id))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let categories: Vec<category::Model> = app
            .server
            .get(&format!("{ACRONYMS_URI}/{}/categories", acronym.id))
            .await
            .json();
        assert_eq!(categories, vec![funny]);
    }

    #[tokio::test]
    async fn test_mutations_require_auth() {
        let app = create_test_app().await;
        let user = app.create_user("bystander").await;
        let acronym = app.create_acronym("OMG", "Oh My God", user.id).await;
        let category = app.storage.create_category("Funny").await.unwrap();
        let body = json!({"short": "LOL", "long": "Laugh Out Loud", "userID": user.id});
        let item = format!("{ACRONYMS_URI}/{}", acronym.id);
        let link = format!("{ACRONYMS_URI}/{}/categories/{}", acronym.id, category.id);

        let responses = [
            app.server.post(ACRONYMS_URI).json(&body).await,
            app.server.put(&item).json(&body).await,
            app.server.delete(&item).await,
            app.server.post(&link).await,
            app.server.delete(&link).await,
            app.server.post("/api/categories").json(&json!({"name": "Rude"})).await,
            app.server.post("/api/users/logout").await,
            app.server
                .delete(&item)
                .add_header(header::AUTHORIZATION, bearer("forged-token"))
                .await,
        ];

        for response in responses {
            response.assert_status(StatusCode::UNAUTHORIZED);
        }

        // Nothing changed
        assert_eq!(app.list_acronyms().await, vec![acronym]);
    }

    #[tokio::test]
    async fn test_invalid_bodies_are_bad_requests() {
        let app = create_test_app().await;
        let user = app.create_user("validator").await;
        let token = app.login("validator").await;

        let bodies = [
            json!({"short": "OMG", "long": "Oh My God"}),
            json!({"long": "Oh My God", "userID": user.id}),
            json!({"short": "", "long": "Oh My God", "userID": user.id}),
            json!({"short": "OMG", "long": "Oh My God", "userID": Uuid::new_v4()}),
            json!({"short": "OMG", "long": "Oh My God", "userID": "not-a-uuid"}),
        ];

        for body in bodies {
            let response = app
                .server
                .post(ACRONYMS_URI)
                .add_header(header::AUTHORIZATION, bearer(&token))
                .json(&body)
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);
        }

        assert!(app.list_acronyms().await.is_empty());
    }

    #[tokio::test]
    async fn test_user_registration_and_login() {
        let app = create_test_app().await;

        let response = app
            .server
            .post("/api/users")
            .json(&json!({"name": "Alice", "username": "alice", "password": PASSWORD}))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["username"], "alice");
        assert!(body.get("password").is_none());
        assert!(body.get("password_hash").is_none());

        let response = app
            .server
            .post("/api/users")
            .json(&json!({"name": "Alice Again", "username": "alice", "password": "x"}))
            .await;
        response.assert_status(StatusCode::CONFLICT);

        let wrong = STANDARD.encode("alice:wrong");
        let response = app
            .server
            .post("/api/users/login")
            .add_header(header::AUTHORIZATION, basic(&wrong))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let unknown = STANDARD.encode(format!("mallory:{PASSWORD}"));
        let response = app
            .server
            .post("/api/users/login")
            .add_header(header::AUTHORIZATION, basic(&unknown))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let users: Vec<PublicUser> = app.server.get("/api/users").await.json();
        assert_eq!(users.len(), 1);

        let response = app.server.get(&format!("/api/users/{}", users[0].id)).await;
        response.assert_status_ok();
        assert_eq!(response.json::<PublicUser>(), users[0]);

        let response = app.server.get(&format!("/api/users/{}", Uuid::new_v4())).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_session_cookie_and_logout() {
        let app = create_test_app().await;
        let user = app.create_user("cookie").await;

        let credentials = STANDARD.encode(format!("cookie:{PASSWORD}"));
        let response = app
            .server
            .post("/api/users/login")
            .add_header(header::AUTHORIZATION, basic(&credentials))
            .await;
        response.assert_status_ok();

        let login: LoginResponse = response.json();
        assert_eq!(login.user_id, user.id);
        let cookie = response.cookie(crate::session::SESSION_COOKIE_NAME);
        assert_eq!(cookie.value(), login.token);
        assert_eq!(cookie.http_only(), Some(true));

        let session_cookie =
            HeaderValue::from_str(&format!("{}={}", cookie.name(), cookie.value())).unwrap();
        let response = app
            .server
            .post("/api/categories")
            .add_header(header::COOKIE, session_cookie.clone())
            .json(&json!({"name": "Funny"}))
            .await;
        response.assert_status_ok();

        let response = app
            .server
            .post("/api/users/logout")
            .add_header(header::COOKIE, session_cookie.clone())
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let response = app
            .server
            .post("/api/categories")
            .add_header(header::COOKIE, session_cookie)
            .json(&json!({"name": "Rude"}))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected_and_removed() {
        let app = create_test_app_with(Config {
            token_max_age_secs: 0,
            ..Config::default()
        })
        .await;
        app.create_user("stale").await;
        let token = app.login("stale").await;
        assert!(app.storage.find_token(&token).await.unwrap().is_some());

        let response = app
            .server
            .post("/api/categories")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({"name": "Funny"}))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        assert!(app.storage.find_token(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_categories_and_user_acronyms() {
        let app = create_test_app().await;
        let user = app.create_user("curator").await;
        let token = app.login("curator").await;

        let response = app
            .server
            .post("/api/categories")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({"name": "Funny"}))
            .await;
        response.assert_status_ok();
        let funny: category::Model = response.json();
        assert_eq!(funny.name, "Funny");

        let response = app
            .server
            .post("/api/categories")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({"name": "Funny"}))
            .await;
        response.assert_status(StatusCode::CONFLICT);

        let categories: Vec<category::Model> = app.server.get("/api/categories").await.json();
        assert_eq!(categories, vec![funny.clone()]);

        let response = app.server.get(&format!("/api/categories/{}", funny.id)).await;
        response.assert_status_ok();

        let response = app.server.get(&format!("/api/categories/{}", funny.id + 1)).await;
        response.assert_status(StatusCode::NOT_FOUND);

        let acronym = app.create_acronym("OMG", "Oh My God", user.id).await;
        let owned: Vec<acronym::Model> = app
            .server
            .get(&format!("/api/users/{}/acronyms", user.id))
            .await
            .json();
        assert_eq!(owned, vec![acronym]);
    }

    #[tokio::test]
    async fn test_api_headers() {
        let app = create_test_app().await;

        let response = app.server.get(ACRONYMS_URI).await;
        response.assert_status_ok();
        assert_eq!(response.header(header::X_CONTENT_TYPE_OPTIONS), "nosniff");
        assert_eq!(response.header(header::CACHE_CONTROL), "no-store");

        let response = app.server.get(&format!("{ACRONYMS_URI}/999")).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], 404);
    }
}
