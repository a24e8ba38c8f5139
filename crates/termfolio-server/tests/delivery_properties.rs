//! Property-based tests for delivery routing.
//!
//! Whatever the request looks like, only an authorized `GET` on the latest
//! path may take a message out of the mailbox.

use std::sync::Arc;

use proptest::prelude::*;
use termfolio_core::{DeliveryGateway, Mailbox, Secret};
use termfolio_server::delivery::{LATEST_PATH, route};
use tiny_http::Method;

const SECRET: &str = "s3cret";

fn method_strategy() -> impl Strategy<Value = Method> {
    prop_oneof![
        Just(Method::Get),
        Just(Method::Post),
        Just(Method::Put),
        Just(Method::Delete),
        Just(Method::Head),
    ]
}

fn url_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "/[a-z/]{0,20}(\\?[a-z=&%0-9]{0,20})?",
        "[a-z=&%0-9]{0,20}".prop_map(|query| format!("{LATEST_PATH}?{query}")),
        Just(format!("{LATEST_PATH}?secret={SECRET}")),
    ]
}

fn is_authorized(method: &Method, url: &str) -> bool {
    *method == Method::Get
        && url.split_once('?').is_some_and(|(path, query)| {
            path == LATEST_PATH
                && url::form_urlencoded::parse(query.as_bytes())
                    .find(|(key, _)| key == "secret")
                    .is_some_and(|(_, value)| value == SECRET)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// The mailbox shrinks only for authorized polls, by exactly one.
    #[test]
    fn prop_only_authorized_polls_consume(
        requests in prop::collection::vec((method_strategy(), url_strategy()), 1..20),
    ) {
        let mailbox = Arc::new(Mailbox::new());
        for i in 0..requests.len() {
            mailbox.submit("visitor", format!("note {i}")).unwrap();
        }
        let gateway = DeliveryGateway::new(Arc::clone(&mailbox), Secret::new(SECRET).unwrap());

        for (method, url) in &requests {
            let before = mailbox.len();
            let reply = route(&gateway, method, url);

            if is_authorized(method, url) {
                prop_assert_eq!(reply.status, 200);
                prop_assert_eq!(mailbox.len(), before - 1);
            } else {
                prop_assert!(matches!(reply.status, 401 | 404 | 405), "status {}", reply.status);
                prop_assert_eq!(mailbox.len(), before);
            }
        }
    }
}
