//! Typed product endpoints over an [`HttpClient`]

use shared::{MessageResponse, ProductFields, ProductRecord};

use crate::ClientResult;
use crate::http::{FormPayload, HttpClient, ImageUpload};

const PRODUCTS: &str = "products";

/// Product API 客户端
#[derive(Debug, Clone)]
pub struct ProductApi<C> {
    http: C,
}

impl<C: HttpClient> ProductApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// GET /products
    pub async fn list(&self) -> ClientResult<Vec<ProductRecord>> {
        self.http.get(PRODUCTS).await
    }

    /// POST /products
    pub async fn create(
        &self,
        fields: &ProductFields,
        image: Option<ImageUpload>,
    ) -> ClientResult<ProductRecord> {
        self.http
            .post_form(PRODUCTS, product_form(fields, image))
            .await
    }

    /// PUT /products/{id}
    pub async fn update(
        &self,
        id: i64,
        fields: &ProductFields,
        image: Option<ImageUpload>,
    ) -> ClientResult<ProductRecord> {
        let form = product_form(fields, image).text("id", id);
        self.http.put_form(&product_path(id), form).await
    }

    /// DELETE /products/{id}
    pub async fn delete(&self, id: i64) -> ClientResult<MessageResponse> {
        self.http.delete(&product_path(id)).await
    }
}

pub fn product_path(id: i64) -> String {
    format!("{}/{}", PRODUCTS, id)
}

fn product_form(fields: &ProductFields, image: Option<ImageUpload>) -> FormPayload {
    FormPayload::new()
        .text("name", &fields.name)
        .text("price", fields.price)
        .text("quantity", fields.quantity)
        .text("description", &fields.description)
        .image(image)
}
