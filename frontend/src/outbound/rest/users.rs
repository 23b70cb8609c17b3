//! Reqwest-backed users API.

use async_trait::async_trait;
use pagination::PageRequest;

use super::client::ApiClient;
use super::dto::UsersResponseDto;
use crate::domain::UsersPage;
use crate::domain::ports::{ApiError, UsersApi};

/// Users API adapter issuing `GET /users?page=&count=`.
#[derive(Debug, Clone)]
pub struct RestUsersApi {
    client: ApiClient,
}

impl RestUsersApi {
    /// Build the adapter on a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UsersApi for RestUsersApi {
    async fn fetch_users(&self, request: PageRequest) -> Result<UsersPage, ApiError> {
        let mut url = self.client.endpoint("users")?;
        url.query_pairs_mut()
            .append_pair("page", &request.page().to_string())
            .append_pair("count", &request.count().to_string());
        let dto: UsersResponseDto = self.client.get_json(url).await?;
        dto.into_domain_page(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::rest::test_server::CannedServer;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn requests_page_and_count_as_query_parameters() {
        let server = CannedServer::start(
            "200 OK",
            r#"{"success":true,"page":2,"total_pages":2,"links":{"next_url":null,"prev_url":null},
               "users":[{"id":3,"name":"Ada","email":"ada@example.test","phone":"+380671234567",
               "position":"Lawyer","position_id":1,"registration_timestamp":5,"photo":"p.jpg"}]}"#,
        )
        .await;
        let api = RestUsersApi::new(server.client());

        let page = api
            .fetch_users(PageRequest::new(2, 6).expect("request"))
            .await
            .expect("users page");
        let request = server.request().await;

        assert!(request.starts_with("GET /api/v1/users?page=2&count=6 "), "{request}");
        assert_eq!(page.page(), 2);
        assert_eq!(page.items().len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_page_is_a_network_error() {
        let server =
            CannedServer::start("404 Not Found", r#"{"success":false,"message":"Page not found"}"#)
                .await;
        let api = RestUsersApi::new(server.client());

        let error = api
            .fetch_users(PageRequest::new(9, 6).expect("request"))
            .await
            .expect_err("page is missing");

        assert!(!error.is_validation());
        assert!(error.message().contains("Page not found"));
    }
}
