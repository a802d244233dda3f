//! Product API Handlers
//!
//! Create and update take `multipart/form-data` with the text fields
//! `name`, `price`, `quantity`, `description` and an optional `image` file.

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use shared::models::{validate_price, validate_quantity};
use shared::{MessageResponse, ProductFields, ProductRecord, ValidationError};

use crate::core::ServerState;
use crate::db::{NewProduct, ProductPatch};
use crate::utils::{AppError, AppResult};

/// Raw multipart submission
#[derive(Debug, Default)]
struct ProductForm {
    name: Option<String>,
    price: Option<String>,
    quantity: Option<String>,
    description: Option<String>,
    image: Option<(String, Bytes)>,
}

impl ProductForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "image" => {
                    let file_name = field.file_name().map(str::to_string).unwrap_or_default();
                    let data = field.bytes().await?;
                    // browsers send an empty part when no file is chosen
                    if !file_name.is_empty() && !data.is_empty() {
                        form.image = Some((file_name, data));
                    }
                }
                "name" => form.name = Some(field.text().await?),
                "price" => form.price = Some(field.text().await?),
                "quantity" => form.quantity = Some(field.text().await?),
                "description" => form.description = Some(field.text().await?),
                other => tracing::trace!(field = other, "Ignoring form field"),
            }
        }
        Ok(form)
    }

    fn price(&self) -> AppResult<Option<f64>> {
        let Some(raw) = &self.price else {
            return Ok(None);
        };
        let price = parse_field::<f64>("price", raw)?;
        validate_price(price)?;
        Ok(Some(price))
    }

    fn quantity(&self) -> AppResult<Option<i64>> {
        let Some(raw) = &self.quantity else {
            return Ok(None);
        };
        let quantity = parse_field::<i64>("quantity", raw)?;
        validate_quantity(quantity)?;
        Ok(Some(quantity))
    }

    fn name(&self) -> AppResult<Option<String>> {
        match self.name.as_deref().map(str::trim) {
            Some("") => Err(ValidationError::EmptyName.into()),
            other => Ok(other.map(str::to_string)),
        }
    }
}

fn parse_field<T: std::str::FromStr>(field: &'static str, raw: &str) -> AppResult<T> {
    raw.trim().parse::<T>().map_err(|_| {
        AppError::from(ValidationError::Unparsable {
            field,
            value: raw.to_string(),
        })
    })
}

fn missing(field: &str) -> AppError {
    AppError::validation(format!("Missing field: {}", field))
}

/// Store the uploaded image, if any, returning its filename
async fn store_image(state: &ServerState, form: &ProductForm) -> AppResult<Option<String>> {
    match &form.image {
        Some((file_name, data)) => state.images.save(file_name, data).await,
        None => Ok(None),
    }
}

/// GET /api/products - 获取所有商品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ProductRecord>>> {
    let products = state.products.find_all().await?;
    Ok(Json(products))
}

/// POST /api/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ProductRecord>)> {
    let form = ProductForm::read(multipart).await?;

    let name = form.name()?.ok_or_else(|| missing("name"))?;
    let price = form.price()?.ok_or_else(|| missing("price"))?;
    let quantity = form.quantity()?.ok_or_else(|| missing("quantity"))?;
    let fields = ProductFields::new(name, price, quantity)
        .with_description(form.description.as_deref().unwrap_or_default())
        .normalized();
    fields.validate()?;

    let image = store_image(&state, &form).await?;
    let record = match state
        .products
        .create(NewProduct {
            fields,
            image: image.clone(),
        })
        .await
    {
        Ok(record) => record,
        Err(e) => {
            if let Some(image) = image {
                state.images.remove(&image).await;
            }
            return Err(e);
        }
    };

    tracing::info!(id = record.id, name = %record.name, "Product created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/products/{id} - 更新商品
///
/// Absent fields keep their stored value; a new image replaces the old file.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<ProductRecord>> {
    let form = ProductForm::read(multipart).await?;

    let patch = ProductPatch {
        name: form.name()?,
        price: form.price()?,
        quantity: form.quantity()?,
        description: form.description.as_deref().map(|d| d.trim().to_string()),
        image: store_image(&state, &form).await?,
    };
    let new_image = patch.image.clone();

    let (record, replaced) = match state.products.update(id, patch).await {
        Ok(result) => result,
        Err(e) => {
            if let Some(image) = new_image {
                state.images.remove(&image).await;
            }
            return Err(e);
        }
    };
    if let Some(old) = replaced
        && Some(&old) != record.image.as_ref()
    {
        state.images.remove(&old).await;
    }

    tracing::info!(id, "Product updated");
    Ok(Json(record))
}

/// DELETE /api/products/{id} - 删除商品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    let removed = state.products.delete(id).await?;
    if let Some(image) = &removed.image {
        state.images.remove(image).await;
    }

    tracing::info!(id, name = %removed.name, "Product deleted");
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
