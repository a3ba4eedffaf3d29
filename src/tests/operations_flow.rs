// Operation-level behavior: receipts, envelope stripping, pre-flight
// rejections, the safe flag on the wire, and credential scope fallback.

#[cfg(test)]
mod test {

    use std::sync::Arc;

    use axum::routing::{get, post};
    use axum::{Json, Router};
    use httpmock::Method::{GET, POST};
    use httpmock::MockServer;
    use serde_json::{json, Value};
    use tokio::sync::Mutex;

    use crate::client::types::{MsgType, OutgoingMessage};
    use crate::error::WecomError;
    use crate::tests::common::{spawn_axum, test_config};
    use crate::WecomClient;

    fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(GET).path("/cgi-bin/gettoken");
            then.status(200).json_body(json!({
                "errcode": 0,
                "errmsg": "ok",
                "access_token": "tok-ops",
                "expires_in": 7200
            }));
        })
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn partial_delivery_reports_invalid_user() {
        let server = MockServer::start_async().await;
        let _token = mock_token(&server);
        server.mock(|when, then| {
            when.method(POST)
                .path("/cgi-bin/message/send")
                .query_param("access_token", "tok-ops");
            then.status(200).json_body(json!({
                "errcode": 0,
                "errmsg": "ok",
                "invaliduser": "zhangsan",
                "invalidparty": "",
                "invalidtag": "",
                "msgid": "mid-1"
            }));
        });

        let client = WecomClient::new(test_config(&server.base_url())).unwrap();
        let message = OutgoingMessage {
            to_user: Some("zhangsan|lisi".to_owned()),
            content: "hello".to_owned(),
            ..Default::default()
        };

        let receipt = client.send_message(&message).await.unwrap();
        assert_eq!(receipt.invalid_user.as_deref(), Some("zhangsan"));
        assert_eq!(receipt.invalid_party, None);
        assert_eq!(receipt.invalid_tag, None);
        assert_eq!(receipt.msg_id.as_deref(), Some("mid-1"));
        assert!(!receipt.fully_delivered());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn missing_recipient_rejected_before_any_network_call() {
        let server = MockServer::start_async().await;
        let token_mock = mock_token(&server);

        let client = WecomClient::new(test_config(&server.base_url())).unwrap();
        let message = OutgoingMessage {
            content: "hello".to_owned(),
            ..Default::default()
        };

        let err = client.send_message(&message).await.unwrap_err();
        match err {
            WecomError::InvalidRequest(msg) => assert!(msg.contains("to_user")),
            other => panic!("expected invalid request, got {:?}", other),
        }

        // blank selectors count as unset, not as a recipient
        let blank = OutgoingMessage {
            to_user: Some(String::new()),
            to_tag: Some("   ".to_owned()),
            content: "hello".to_owned(),
            ..Default::default()
        };
        let err = client.send_message(&blank).await.unwrap_err();
        assert!(matches!(err, WecomError::InvalidRequest(_)));
        assert_eq!(token_mock.hits_async().await, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn profile_strips_envelope_fields() {
        let server = MockServer::start_async().await;
        let _token = mock_token(&server);
        server.mock(|when, then| {
            when.method(GET)
                .path("/cgi-bin/user/get")
                .query_param("userid", "zhangsan");
            then.status(200).json_body(json!({
                "errcode": 0,
                "errmsg": "ok",
                "userid": "zhangsan",
                "name": "Zhang San",
                "department": [1, 2]
            }));
        });

        let client = WecomClient::new(test_config(&server.base_url())).unwrap();
        let profile = client.get_user_profile("zhangsan").await.unwrap();

        assert_eq!(profile.get("userid"), Some(&json!("zhangsan")));
        assert_eq!(profile.get("name"), Some(&json!("Zhang San")));
        assert_eq!(profile.get("department"), Some(&json!([1, 2])));
        assert!(profile.get("errcode").is_none());
        assert!(profile.get("errmsg").is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn empty_user_id_rejected_before_any_network_call() {
        let server = MockServer::start_async().await;
        let token_mock = mock_token(&server);

        let client = WecomClient::new(test_config(&server.base_url())).unwrap();
        let err = client.get_user_profile("   ").await.unwrap_err();
        match err {
            WecomError::InvalidRequest(msg) => assert!(msg.contains("user_id")),
            other => panic!("expected invalid request, got {:?}", other),
        }
        assert_eq!(token_mock.hits_async().await, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn safe_default_and_override_reach_the_wire() {
        let seen = Arc::new(Mutex::new(Vec::<Value>::new()));
        let seen_route = seen.clone();
        let router = Router::new()
            .route(
                "/cgi-bin/gettoken",
                get(|| async {
                    Json(json!({
                        "errcode": 0,
                        "errmsg": "ok",
                        "access_token": "tok-safe",
                        "expires_in": 7200
                    }))
                }),
            )
            .route(
                "/cgi-bin/message/send",
                post(move |Json(body): Json<Value>| {
                    let seen = seen_route.clone();
                    async move {
                        seen.lock().await.push(body);
                        Json(json!({ "errcode": 0, "errmsg": "ok" }))
                    }
                }),
            );
        let (handle, addr) = spawn_axum(router).await;

        let mut config = test_config(&format!("http://{}", addr));
        config.safe_mode = true;
        let client = WecomClient::new(config).unwrap();

        let default_safe = OutgoingMessage {
            to_user: Some("u1".to_owned()),
            content: "hi".to_owned(),
            ..Default::default()
        };
        client.send_message(&default_safe).await.unwrap();

        let overridden = OutgoingMessage {
            to_user: Some("u1".to_owned()),
            content: "hi".to_owned(),
            safe: Some(false),
            ..Default::default()
        };
        client.send_message(&overridden).await.unwrap();

        let as_markdown = OutgoingMessage {
            to_user: Some("u1".to_owned()),
            content: "**hi**".to_owned(),
            msg_type: MsgType::Markdown,
            ..Default::default()
        };
        client.send_message(&as_markdown).await.unwrap();

        let bodies = seen.lock().await;
        // configured default applies when the message does not decide
        assert_eq!(bodies[0]["safe"], 1);
        assert_eq!(bodies[0]["msgtype"], "text");
        assert_eq!(bodies[0]["text"]["content"], "hi");
        assert_eq!(bodies[0]["agentid"], 1000002);
        // unset selectors travel as empty strings
        assert_eq!(bodies[0]["touser"], "u1");
        assert_eq!(bodies[0]["toparty"], "");
        assert_eq!(bodies[0]["totag"], "");
        // explicit safe=false wins over the default
        assert_eq!(bodies[1]["safe"], 0);
        // exactly one content block, matching msgtype
        assert_eq!(bodies[2]["msgtype"], "markdown");
        assert_eq!(bodies[2]["markdown"]["content"], "**hi**");
        assert!(bodies[2].get("text").is_none());

        handle.abort();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn probe_connectivity_returns_ip_list_via_fallback_secret() {
        let server = MockServer::start_async().await;
        // no contacts secret configured: the probe must authenticate
        // with the messaging secret
        let token_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/cgi-bin/gettoken")
                .query_param("corpsecret", "agent-secret-1");
            then.status(200).json_body(json!({
                "errcode": 0,
                "errmsg": "ok",
                "access_token": "tok-probe",
                "expires_in": 7200
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/cgi-bin/get_api_domain_ip");
            then.status(200).json_body(json!({
                "errcode": 0,
                "errmsg": "ok",
                "ip_list": ["182.254.11.176", "182.254.78.66"]
            }));
        });

        let client = WecomClient::new(test_config(&server.base_url())).unwrap();
        let result = client.probe_connectivity().await.unwrap();
        assert_eq!(result.ip_list, vec!["182.254.11.176", "182.254.78.66"]);
        assert_eq!(token_mock.hits_async().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn contacts_secret_used_for_directory_calls_when_configured() {
        let server = MockServer::start_async().await;
        let contacts_token = server.mock(|when, then| {
            when.method(GET)
                .path("/cgi-bin/gettoken")
                .query_param("corpsecret", "contacts-secret-9");
            then.status(200).json_body(json!({
                "errcode": 0,
                "errmsg": "ok",
                "access_token": "tok-contacts",
                "expires_in": 7200
            }));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/cgi-bin/user/get")
                .query_param("access_token", "tok-contacts");
            then.status(200).json_body(json!({
                "errcode": 0,
                "errmsg": "ok",
                "userid": "lisi"
            }));
        });

        let mut config = test_config(&server.base_url());
        config.contacts_secret = Some("contacts-secret-9".to_owned());
        let client = WecomClient::new(config).unwrap();

        let profile = client.get_user_profile("lisi").await.unwrap();
        assert_eq!(profile.get("userid"), Some(&json!("lisi")));
        assert_eq!(contacts_token.hits_async().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn malformed_body_maps_to_transport_error() {
        let server = MockServer::start_async().await;
        let _token = mock_token(&server);
        server.mock(|when, then| {
            when.method(GET).path("/cgi-bin/get_api_domain_ip");
            then.status(200).body("<html>bad gateway</html>");
        });

        let client = WecomClient::new(test_config(&server.base_url())).unwrap();
        let err = client.probe_connectivity().await.unwrap_err();
        match err {
            // the failing request's URL held the token; the text must not
            WecomError::Transport(msg) => assert!(!msg.contains("tok-ops")),
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
