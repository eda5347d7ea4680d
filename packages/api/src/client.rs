//! # Authenticated API client
//!
//! [`ApiClient`] turns typed operations into [`HttpRequest`]s for the
//! ZenVit backend. It holds no session state: every protected call takes the
//! caller's current token and refuses to send anything without one.
//!
//! Non-2xx responses become [`ApiError`]s carrying the backend's `detail`
//! message, and every failure is logged at `warn` level with method, path and
//! status.

use futures::future::{join, join_all};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::{
    AdjustmentResult, DashboardView, Recommendations, ReportPeriod, SearchResults,
    StockAdjustment, StockItem, StockMovement, TimelineEntry, TokenResponse, UserInfo,
};
use crate::resource::{
    ref_options, Record, References, ResourceKind, ResourceSchema, StockAdjustmentDraft,
};
use crate::transport::{FilePart, HttpRequest, HttpResponse, Transport};
use crate::upload::{validate_image, ImageUpload};

/// Minimum length of the free-text context sent to the recommendation engine.
pub const MIN_AI_CONTEXT_CHARS: usize = 10;

#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    transport: T,
}

fn bearer(token: Option<&str>) -> Result<&str, ApiError> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::MissingToken)
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let path = request.path.clone();

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(method = method.as_str(), path = %path, "request failed: {err}");
                return Err(err);
            }
        };
        if response.is_success() {
            return Ok(response);
        }

        let err = ApiError::from_response(response.status, &response.body);
        tracing::warn!(
            method = method.as_str(),
            path = %path,
            status = response.status,
            "backend rejected request: {err}"
        );
        Err(err)
    }

    async fn fetch<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        self.execute(request).await?.json()
    }

    // ---- auth ----

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        self.fetch(HttpRequest::post("auth/login").json(json!({
            "email": email.trim(),
            "password": password,
        })))
        .await
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<(), ApiError> {
        self.execute(HttpRequest::post("auth/register").json(json!({
            "email": email.trim(),
            "password": password,
            "full_name": full_name.trim(),
        })))
        .await
        .map(|_| ())
    }

    /// `GET /auth/me`: verify a token and load its user.
    pub async fn current_user(&self, token: Option<&str>) -> Result<UserInfo, ApiError> {
        let token = bearer(token)?;
        self.fetch(HttpRequest::get("auth/me").bearer(token)).await
    }

    // ---- generic CRUD ----

    pub async fn list<R: Record>(&self, token: Option<&str>) -> Result<Vec<R>, ApiError> {
        let token = bearer(token)?;
        self.fetch(HttpRequest::get(R::KIND.path()).bearer(token))
            .await
    }

    /// Untyped listing, used for reference option lists.
    pub async fn list_values(
        &self,
        token: Option<&str>,
        kind: ResourceKind,
    ) -> Result<Vec<Value>, ApiError> {
        let token = bearer(token)?;
        self.fetch(HttpRequest::get(kind.path()).bearer(token)).await
    }

    /// Fetch a page's records and every option list its form references,
    /// concurrently. Resolves once all requests have settled.
    pub async fn load_page<R: Record>(
        &self,
        token: Option<&str>,
        schema: &ResourceSchema,
    ) -> Result<(Vec<R>, References), ApiError> {
        let kinds = schema.references();
        let (records, lists) = join(
            self.list::<R>(token),
            join_all(kinds.iter().map(|kind| self.list_values(token, *kind))),
        )
        .await;

        let records = records?;
        let mut references = References::default();
        for (kind, values) in kinds.into_iter().zip(lists) {
            references.insert(kind, ref_options(&values?));
        }
        Ok((records, references))
    }

    pub async fn create(
        &self,
        token: Option<&str>,
        kind: ResourceKind,
        payload: &Value,
    ) -> Result<Value, ApiError> {
        let token = bearer(token)?;
        let response = self
            .execute(HttpRequest::post(kind.path()).bearer(token).json(payload.clone()))
            .await?;
        Ok(response.json().unwrap_or(Value::Null))
    }

    pub async fn update(
        &self,
        token: Option<&str>,
        kind: ResourceKind,
        id: &str,
        payload: &Value,
    ) -> Result<Value, ApiError> {
        let token = bearer(token)?;
        let response = self
            .execute(
                HttpRequest::put(kind.item_path(id))
                    .bearer(token)
                    .json(payload.clone()),
            )
            .await?;
        Ok(response.json().unwrap_or(Value::Null))
    }

    pub async fn delete(
        &self,
        token: Option<&str>,
        kind: ResourceKind,
        id: &str,
    ) -> Result<(), ApiError> {
        let token = bearer(token)?;
        self.execute(HttpRequest::delete(kind.item_path(id)).bearer(token))
            .await
            .map(|_| ())
    }

    // ---- entity-specific ----

    /// `PUT /{orders|tasks}/{id}/status?status=`.
    pub async fn set_status(
        &self,
        token: Option<&str>,
        kind: ResourceKind,
        id: &str,
        status: &str,
    ) -> Result<(), ApiError> {
        let token = bearer(token)?;
        if !kind.has_status_endpoint() {
            return Err(ApiError::InvalidInput(format!(
                "{} har ingen statusendring",
                kind.label()
            )));
        }
        self.execute(
            HttpRequest::put(format!("{}/status", kind.item_path(id)))
                .query("status", status)
                .bearer(token),
        )
        .await
        .map(|_| ())
    }

    pub async fn receive_purchase(&self, token: Option<&str>, id: &str) -> Result<(), ApiError> {
        let token = bearer(token)?;
        self.execute(
            HttpRequest::put(format!("purchases/{id}/receive"))
                .bearer(token)
                .json(json!({})),
        )
        .await
        .map(|_| ())
    }

    pub async fn customer_timeline(
        &self,
        token: Option<&str>,
        customer_id: &str,
    ) -> Result<Vec<TimelineEntry>, ApiError> {
        let token = bearer(token)?;
        self.fetch(HttpRequest::get(format!("customers/{customer_id}/timeline")).bearer(token))
            .await
    }

    pub async fn stock_movements_for(
        &self,
        token: Option<&str>,
        product_id: &str,
    ) -> Result<Vec<StockMovement>, ApiError> {
        let token = bearer(token)?;
        self.fetch(
            HttpRequest::get("stock/movements")
                .query("product_id", product_id)
                .bearer(token),
        )
        .await
    }

    pub async fn stock_adjustments(
        &self,
        token: Option<&str>,
    ) -> Result<Vec<StockAdjustment>, ApiError> {
        let token = bearer(token)?;
        self.fetch(HttpRequest::get("stock/adjustments").bearer(token))
            .await
    }

    /// `POST /stock/adjust`. An incomplete draft is rejected before any request.
    pub async fn adjust_stock(
        &self,
        token: Option<&str>,
        draft: &StockAdjustmentDraft,
    ) -> Result<AdjustmentResult, ApiError> {
        let token = bearer(token)?;
        let payload = draft
            .to_payload()
            .map_err(|err| ApiError::InvalidInput(err.to_string()))?;
        self.fetch(HttpRequest::post("stock/adjust").bearer(token).json(payload))
            .await
    }

    /// Stock levels and adjustment history, fetched concurrently.
    pub async fn load_adjustments(
        &self,
        token: Option<&str>,
    ) -> Result<(Vec<StockItem>, Vec<StockAdjustment>), ApiError> {
        let (stock, history) = join(self.list::<StockItem>(token), self.stock_adjustments(token)).await;
        Ok((stock?, history?))
    }

    /// A blank query returns no results without calling the backend.
    pub async fn search(&self, token: Option<&str>, query: &str) -> Result<SearchResults, ApiError> {
        let token = bearer(token)?;
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResults::default());
        }
        self.fetch(HttpRequest::get("search").query("q", query).bearer(token))
            .await
    }

    pub async fn dashboard(&self, token: Option<&str>, view: DashboardView) -> Result<Value, ApiError> {
        let token = bearer(token)?;
        self.fetch(HttpRequest::get(view.path()).bearer(token)).await
    }

    pub async fn reports(&self, token: Option<&str>, period: ReportPeriod) -> Result<Value, ApiError> {
        let token = bearer(token)?;
        self.fetch(HttpRequest::get(period.path()).bearer(token)).await
    }

    /// Upload a product image and return the server-relative `image_url`.
    /// Wrong type or oversized files are rejected before any request.
    pub async fn upload_image(
        &self,
        token: Option<&str>,
        upload: ImageUpload,
    ) -> Result<String, ApiError> {
        let token = bearer(token)?;
        let mime = validate_image(&upload)?;

        #[derive(serde::Deserialize)]
        struct Uploaded {
            image_url: String,
        }

        let uploaded: Uploaded = self
            .fetch(HttpRequest::post("upload-image").bearer(token).file(FilePart {
                field: "file".to_string(),
                file_name: upload.file_name,
                mime,
                bytes: upload.bytes,
            }))
            .await?;
        Ok(uploaded.image_url)
    }

    pub async fn recommend_products(
        &self,
        token: Option<&str>,
        customer_context: &str,
    ) -> Result<Recommendations, ApiError> {
        let token = bearer(token)?;
        let context = customer_context.trim();
        if context.chars().count() < MIN_AI_CONTEXT_CHARS {
            return Err(ApiError::InvalidInput(format!(
                "Beskriv kunden med minst {MIN_AI_CONTEXT_CHARS} tegn"
            )));
        }
        self.fetch(
            HttpRequest::post("ai/recommend-products")
                .bearer(token)
                .json(json!({ "customer_context": context })),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Product, Task};
    use crate::resource::schema::PRODUCTS;
    use crate::transport::mock::MockTransport;
    use crate::transport::{Body, Method};
    use serde_json::json;

    fn client() -> (ApiClient<MockTransport>, MockTransport) {
        let mock = MockTransport::new();
        (ApiClient::new(mock.clone()), mock)
    }

    #[tokio::test]
    async fn test_protected_call_without_token_sends_nothing() {
        let (client, mock) = client();
        let err = client.list::<Product>(None).await.unwrap_err();
        assert_eq!(err, ApiError::MissingToken);
        let err = client.list::<Product>(Some("  ")).await.unwrap_err();
        assert_eq!(err, ApiError::MissingToken);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_bearer_header_attached() {
        let (client, mock) = client();
        mock.on(Method::Get, "customers", 200, json!([{"id": "c1", "name": "Ola"}]));

        let customers = client.list::<Customer>(Some("tok")).await.unwrap();
        assert_eq!(customers.len(), 1);
        let req = mock.last_request().unwrap();
        assert_eq!(req.bearer.as_deref(), Some("tok"));
        assert_eq!(req.path, "customers");
    }

    #[tokio::test]
    async fn test_empty_product_list() {
        let (client, mock) = client();
        mock.on(Method::Get, "products", 200, json!([]));
        let products = client.list::<Product>(Some("tok")).await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_validation_detail_surfaces() {
        let (client, mock) = client();
        mock.on(
            Method::Post,
            "tasks",
            422,
            json!({"detail": [{"loc": ["body", "title"], "msg": "field required"}]}),
        );
        let err = client
            .create(Some("tok"), ResourceKind::Tasks, &json!({}))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Validation("title: field required".into()));
    }

    #[tokio::test]
    async fn test_load_page_fetches_references() {
        let (client, mock) = client();
        mock.on(Method::Get, "products", 200, json!([{"id": "p1", "name": "D3", "supplier_id": "s1"}]))
            .on(Method::Get, "suppliers", 200, json!([{"id": "s1", "name": "Nordic Labs"}]));

        let (products, refs) = client
            .load_page::<Product>(Some("tok"), &PRODUCTS)
            .await
            .unwrap();
        assert_eq!(products[0].name, "D3");
        assert_eq!(refs.label(ResourceKind::Suppliers, "s1"), Some("Nordic Labs"));
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_load_page_reference_failure_fails_page() {
        let (client, mock) = client();
        mock.on(Method::Get, "products", 200, json!([]))
            .on(Method::Get, "suppliers", 500, json!({"detail": "db down"}));

        let err = client
            .load_page::<Product>(Some("tok"), &PRODUCTS)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "db down");
        // Both requests were still issued.
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_set_status_uses_query() {
        let (client, mock) = client();
        mock.on(Method::Put, "tasks/t1/status", 200, json!({"message": "ok"}));
        client
            .set_status(Some("tok"), ResourceKind::Tasks, "t1", "Done")
            .await
            .unwrap();
        let req = mock.last_request().unwrap();
        assert_eq!(req.query, vec![("status".to_string(), "Done".to_string())]);

        let err = client
            .set_status(Some("tok"), ResourceKind::Customers, "c1", "VIP")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_receive_purchase() {
        let (client, mock) = client();
        mock.on(Method::Put, "purchases/pu1/receive", 200, json!({}));
        client.receive_purchase(Some("tok"), "pu1").await.unwrap();
        assert_eq!(mock.last_request().unwrap().method, Method::Put);
    }

    #[tokio::test]
    async fn test_blank_search_skips_request() {
        let (client, mock) = client();
        let results = client.search(Some("tok"), "   ").await.unwrap();
        assert!(results.is_empty());
        assert_eq!(mock.request_count(), 0);

        mock.on(Method::Get, "search", 200, json!({"tasks": [{"id": "t1", "title": "Omega"}]}));
        let results = client.search(Some("tok"), "omega").await.unwrap();
        assert_eq!(results.tasks, vec![Task { id: "t1".into(), title: "Omega".into(), ..Default::default() }]);
        assert_eq!(
            mock.last_request().unwrap().query,
            vec![("q".to_string(), "omega".to_string())]
        );
    }

    #[tokio::test]
    async fn test_ai_context_too_short() {
        let (client, mock) = client();
        let err = client
            .recommend_products(Some("tok"), "  trøtt  ")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_image() {
        let (client, mock) = client();
        mock.on(Method::Post, "upload-image", 200, json!({"image_url": "/uploads/x.png"}));

        let url = client
            .upload_image(
                Some("tok"),
                ImageUpload {
                    file_name: "x.png".into(),
                    mime: None,
                    bytes: vec![1, 2, 3],
                },
            )
            .await
            .unwrap();
        assert_eq!(url, "/uploads/x.png");
        match mock.last_request().unwrap().body {
            Body::File(part) => {
                assert_eq!(part.field, "file");
                assert_eq!(part.mime, "image/png");
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_upload_rejects_wrong_type_locally() {
        let (client, mock) = client();
        let err = client
            .upload_image(
                Some("tok"),
                ImageUpload {
                    file_name: "notes.pdf".into(),
                    mime: Some("application/pdf".into()),
                    bytes: vec![0],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Upload(_)));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_network_failure() {
        let (client, mock) = client();
        mock.go_offline();
        let err = client.dashboard(Some("tok"), DashboardView::Stats).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_adjust_stock_rejects_incomplete_draft() {
        let (client, mock) = client();
        let mut draft = StockAdjustmentDraft {
            product_id: "P1".into(),
            change: "0".into(),
            reason: "Telling".into(),
        };
        let err = client.adjust_stock(Some("tok"), &draft).await.unwrap_err();
        assert_eq!(err, ApiError::InvalidInput("Endring kan ikke være 0".into()));

        draft.change = "4".into();
        draft.reason = " ".into();
        let err = client.adjust_stock(Some("tok"), &draft).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::InvalidInput("Vennligst oppgi årsak for justeringen".into())
        );
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_adjust_stock_then_reload() {
        let (client, mock) = client();
        mock.on(
            Method::Post,
            "stock/adjust",
            200,
            json!({"message": "Lager justert", "new_quantity": 12}),
        )
        .on(Method::Get, "stock", 200, json!([{"id": "s1", "product_id": "P1", "quantity": 12}]))
        .on(
            Method::Get,
            "stock/adjustments",
            200,
            json!([{"id": "a1", "product_name": "D3", "change": -3, "reason": "Svinn"}]),
        );

        let draft = StockAdjustmentDraft {
            product_id: "P1".into(),
            change: "-3".into(),
            reason: "Svinn".into(),
        };
        let done = client.adjust_stock(Some("tok"), &draft).await.unwrap();
        assert_eq!(done.new_quantity, 12);
        match mock.last_request().unwrap().body {
            Body::Json(body) => assert_eq!(body, json!({"product_id": "P1", "change": -3, "reason": "Svinn"})),
            other => panic!("unexpected body {other:?}"),
        }

        let (stock, history) = client.load_adjustments(Some("tok")).await.unwrap();
        assert_eq!(stock[0].quantity, 12);
        assert_eq!(history[0].signed_change(), "-3");
        assert_eq!(mock.request_count(), 3);
    }
}
