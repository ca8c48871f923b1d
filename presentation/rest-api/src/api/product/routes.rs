use std::sync::Arc;

use bigdecimal::BigDecimal;
use poem_openapi::{OpenApi, param::Path, param::Query, payload::Json};
use uuid::Uuid;

use business::domain::product::model::ProductChanges;
use business::domain::product::use_cases::add_review::{AddReviewParams, AddReviewUseCase};
use business::domain::product::use_cases::create::{CreateProductParams, CreateProductUseCase};
use business::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};
use business::domain::product::use_cases::get_all::{GetAllProductsParams, GetAllProductsUseCase};
use business::domain::product::use_cases::get_by_id::{
    GetProductByIdParams, GetProductByIdUseCase,
};
use business::domain::product::use_cases::update::{UpdateProductParams, UpdateProductUseCase};
use business::domain::product::value_objects::{Category, ProductSort, SortOrder};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::product::dto::{
    AddReviewRequest, CreateProductRequest, DeleteProductEnvelope, ProductEnvelope,
    ProductListEnvelope, ProductMutationEnvelope, UpdateProductRequest,
};
use crate::api::security::BearerAuth;
use crate::api::tags::ApiTags;

pub struct ProductApi {
    create_use_case: Arc<dyn CreateProductUseCase>,
    get_all_use_case: Arc<dyn GetAllProductsUseCase>,
    get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
    update_use_case: Arc<dyn UpdateProductUseCase>,
    delete_use_case: Arc<dyn DeleteProductUseCase>,
    add_review_use_case: Arc<dyn AddReviewUseCase>,
}

impl ProductApi {
    pub fn new(
        create_use_case: Arc<dyn CreateProductUseCase>,
        get_all_use_case: Arc<dyn GetAllProductsUseCase>,
        get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
        update_use_case: Arc<dyn UpdateProductUseCase>,
        delete_use_case: Arc<dyn DeleteProductUseCase>,
        add_review_use_case: Arc<dyn AddReviewUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            get_all_use_case,
            get_by_id_use_case,
            update_use_case,
            delete_use_case,
            add_review_use_case,
        }
    }
}

fn validation_error(message: &str) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        name: "ValidationError".to_string(),
        message: message.to_string(),
    })
}

fn decimal_from(value: f64) -> Result<BigDecimal, ()> {
    BigDecimal::try_from(value).map_err(|_| ())
}

/// Product catalog API
///
/// Public listing and detail endpoints plus authenticated catalog mutations.
#[OpenApi]
impl ProductApi {
    /// List products
    ///
    /// Returns a catalog page filtered, sorted, and paginated the way the
    /// browser client asks for it.
    #[oai(path = "/products", method = "get", tag = "ApiTags::Products")]
    #[allow(clippy::too_many_arguments)]
    async fn get_all_products(
        &self,
        search: Query<Option<String>>,
        category: Query<Option<String>>,
        #[oai(name = "minPrice")] min_price: Query<Option<f64>>,
        #[oai(name = "maxPrice")] max_price: Query<Option<f64>>,
        featured: Query<Option<bool>>,
        #[oai(name = "onSale")] on_sale: Query<Option<bool>>,
        #[oai(name = "sortBy")] sort_by: Query<Option<String>>,
        #[oai(name = "sortOrder")] sort_order: Query<Option<String>>,
        page: Query<Option<u32>>,
        limit: Query<Option<u32>>,
    ) -> GetAllProductsResponse {
        let category = match category.0.filter(|c| !c.is_empty()) {
            Some(raw) => match raw.parse::<Category>() {
                Ok(category) => Some(category),
                Err(_) => {
                    return GetAllProductsResponse::BadRequest(validation_error(
                        "product.invalid_category",
                    ));
                }
            },
            None => None,
        };

        let sort_by = match sort_by.0.filter(|s| !s.is_empty()) {
            Some(raw) => match raw.parse::<ProductSort>() {
                Ok(sort) => sort,
                Err(_) => {
                    return GetAllProductsResponse::BadRequest(validation_error(
                        "product.invalid_sort",
                    ));
                }
            },
            None => ProductSort::default(),
        };

        let sort_order = match sort_order.0.filter(|s| !s.is_empty()) {
            Some(raw) => match raw.parse::<SortOrder>() {
                Ok(order) => order,
                Err(_) => {
                    return GetAllProductsResponse::BadRequest(validation_error(
                        "product.invalid_sort",
                    ));
                }
            },
            None => SortOrder::default(),
        };

        let min_price = match min_price.0.map(decimal_from).transpose() {
            Ok(value) => value,
            Err(()) => {
                return GetAllProductsResponse::BadRequest(validation_error(
                    "product.invalid_price_filter",
                ));
            }
        };
        let max_price = match max_price.0.map(decimal_from).transpose() {
            Ok(value) => value,
            Err(()) => {
                return GetAllProductsResponse::BadRequest(validation_error(
                    "product.invalid_price_filter",
                ));
            }
        };

        let params = GetAllProductsParams {
            search: search.0.filter(|s| !s.is_empty()),
            category,
            min_price,
            max_price,
            featured: featured.0,
            on_sale: on_sale.0,
            sort_by,
            sort_order,
            page: page.0,
            limit: limit.0,
        };

        match self.get_all_use_case.execute(params).await {
            Ok(page) => GetAllProductsResponse::Ok(Json(ProductListEnvelope {
                success: true,
                products: page.products.into_iter().map(|p| p.into()).collect(),
                total: i64::try_from(page.total).unwrap_or(i64::MAX),
                page: page.page,
                pages: page.pages,
            })),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetAllProductsResponse::InternalError(json)
            }
        }
    }

    /// Get a product by ID
    ///
    /// Returns the product together with its reviews.
    #[oai(path = "/products/:id", method = "get", tag = "ApiTags::Products")]
    async fn get_product_by_id(&self, id: Path<String>) -> GetProductByIdResponse {
        let uuid = match Uuid::parse_str(&id.0) {
            Ok(uuid) => uuid,
            Err(_) => {
                return GetProductByIdResponse::BadRequest(validation_error("product.invalid_id"));
            }
        };

        match self
            .get_by_id_use_case
            .execute(GetProductByIdParams { id: uuid })
            .await
        {
            Ok(detail) => GetProductByIdResponse::Ok(Json(ProductEnvelope {
                success: true,
                product: detail.into(),
            })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => GetProductByIdResponse::NotFound(json),
                    _ => GetProductByIdResponse::InternalError(json),
                }
            }
        }
    }

    /// Create a product
    #[oai(path = "/products", method = "post", tag = "ApiTags::Products")]
    async fn create_product(
        &self,
        _auth: BearerAuth,
        body: Json<CreateProductRequest>,
    ) -> CreateProductResponse {
        let category = match body.0.category.parse::<Category>() {
            Ok(category) => category,
            Err(_) => {
                return CreateProductResponse::BadRequest(validation_error(
                    "product.invalid_category",
                ));
            }
        };

        let price = match decimal_from(body.0.price) {
            Ok(price) => price,
            Err(()) => {
                return CreateProductResponse::BadRequest(validation_error(
                    "product.invalid_price",
                ));
            }
        };

        let sale_price = match body.0.sale_price.map(decimal_from).transpose() {
            Ok(value) => value,
            Err(()) => {
                return CreateProductResponse::BadRequest(validation_error(
                    "product.invalid_price",
                ));
            }
        };

        let stock = match body.0.stock {
            None => 0,
            Some(raw) => match u32::try_from(raw) {
                Ok(stock) => stock,
                Err(_) => {
                    return CreateProductResponse::BadRequest(validation_error(
                        "product.invalid_stock",
                    ));
                }
            },
        };

        let params = CreateProductParams {
            name: body.0.name,
            description: body.0.description,
            price,
            category,
            brand: body.0.brand,
            images: body.0.images.unwrap_or_default(),
            stock,
            featured: body.0.featured.unwrap_or(false),
            on_sale: body.0.on_sale.unwrap_or(false),
            sale_price,
        };

        match self.create_use_case.execute(params).await {
            Ok(product) => CreateProductResponse::Created(Json(ProductMutationEnvelope {
                success: true,
                message: "Product created".to_string(),
                product: product.into(),
            })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CreateProductResponse::BadRequest(json),
                    _ => CreateProductResponse::InternalError(json),
                }
            }
        }
    }

    /// Update a product
    ///
    /// Partial update: absent fields are left as they are. Price snapshots
    /// already held in carts are not re-priced.
    #[oai(path = "/products/:id", method = "put", tag = "ApiTags::Products")]
    async fn update_product(
        &self,
        _auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateProductRequest>,
    ) -> UpdateProductResponse {
        let uuid = match Uuid::parse_str(&id.0) {
            Ok(uuid) => uuid,
            Err(_) => {
                return UpdateProductResponse::BadRequest(validation_error("product.invalid_id"));
            }
        };

        let category = match body.0.category {
            Some(raw) => match raw.parse::<Category>() {
                Ok(category) => Some(category),
                Err(_) => {
                    return UpdateProductResponse::BadRequest(validation_error(
                        "product.invalid_category",
                    ));
                }
            },
            None => None,
        };

        let price = match body.0.price.map(decimal_from).transpose() {
            Ok(value) => value,
            Err(()) => {
                return UpdateProductResponse::BadRequest(validation_error(
                    "product.invalid_price",
                ));
            }
        };
        let sale_price = match body.0.sale_price.map(decimal_from).transpose() {
            Ok(value) => value,
            Err(()) => {
                return UpdateProductResponse::BadRequest(validation_error(
                    "product.invalid_price",
                ));
            }
        };

        let stock = match body.0.stock {
            None => None,
            Some(raw) => match u32::try_from(raw) {
                Ok(stock) => Some(stock),
                Err(_) => {
                    return UpdateProductResponse::BadRequest(validation_error(
                        "product.invalid_stock",
                    ));
                }
            },
        };

        let params = UpdateProductParams {
            id: uuid,
            changes: ProductChanges {
                name: body.0.name,
                description: body.0.description,
                price,
                category,
                brand: body.0.brand,
                images: body.0.images,
                stock,
                featured: body.0.featured,
                on_sale: body.0.on_sale,
                sale_price,
            },
        };

        match self.update_use_case.execute(params).await {
            Ok(product) => UpdateProductResponse::Ok(Json(ProductMutationEnvelope {
                success: true,
                message: "Product updated".to_string(),
                product: product.into(),
            })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => UpdateProductResponse::BadRequest(json),
                    404 => UpdateProductResponse::NotFound(json),
                    _ => UpdateProductResponse::InternalError(json),
                }
            }
        }
    }

    /// Delete a product
    ///
    /// Removes the product and its reviews from the catalog.
    #[oai(path = "/products/:id", method = "delete", tag = "ApiTags::Products")]
    async fn delete_product(&self, _auth: BearerAuth, id: Path<String>) -> DeleteProductResponse {
        let uuid = match Uuid::parse_str(&id.0) {
            Ok(uuid) => uuid,
            Err(_) => {
                return DeleteProductResponse::BadRequest(validation_error("product.invalid_id"));
            }
        };

        match self
            .delete_use_case
            .execute(DeleteProductParams { id: uuid })
            .await
        {
            Ok(()) => DeleteProductResponse::Ok(Json(DeleteProductEnvelope {
                success: true,
                message: "Product deleted".to_string(),
            })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => DeleteProductResponse::NotFound(json),
                    _ => DeleteProductResponse::InternalError(json),
                }
            }
        }
    }

    /// Review a product
    ///
    /// One review per caller per product; the product's average rating is
    /// refreshed on success.
    #[oai(
        path = "/products/:id/reviews",
        method = "post",
        tag = "ApiTags::Products"
    )]
    async fn add_review(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<AddReviewRequest>,
    ) -> AddReviewResponse {
        let uuid = match Uuid::parse_str(&id.0) {
            Ok(uuid) => uuid,
            Err(_) => {
                return AddReviewResponse::BadRequest(validation_error("product.invalid_id"));
            }
        };

        let params = AddReviewParams {
            product_id: uuid,
            user_id: auth.0.user_id,
            user_name: auth.0.name.unwrap_or_else(|| "Anonymous".to_string()),
            // out-of-range values collapse to 0 and fail domain validation
            rating: u8::try_from(body.0.rating).unwrap_or(0),
            comment: body.0.comment,
        };

        match self.add_review_use_case.execute(params).await {
            Ok(detail) => AddReviewResponse::Created(Json(ProductMutationEnvelope {
                success: true,
                message: "Review added".to_string(),
                product: detail.into(),
            })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => AddReviewResponse::BadRequest(json),
                    404 => AddReviewResponse::NotFound(json),
                    409 => AddReviewResponse::Conflict(json),
                    _ => AddReviewResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetAllProductsResponse {
    #[oai(status = 200)]
    Ok(Json<ProductListEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetProductByIdResponse {
    #[oai(status = 200)]
    Ok(Json<ProductEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateProductResponse {
    #[oai(status = 201)]
    Created(Json<ProductMutationEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateProductResponse {
    #[oai(status = 200)]
    Ok(Json<ProductMutationEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum DeleteProductResponse {
    #[oai(status = 200)]
    Ok(Json<DeleteProductEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum AddReviewResponse {
    #[oai(status = 201)]
    Created(Json<ProductMutationEnvelope>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
