//! Client bindings for the Lakehouse Data management API.
//!
//! The crate exposes one [`LakehouseDataClient`] with a thin async
//! method per API operation. Transport, auth, retries, and deadlines
//! live in `lakehouse-core`; this crate contributes the endpoint
//! catalog and its request/response types.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use lakehouse_core::Authenticator;
//! use lakehouse_data::{LakehouseDataClient, Region};
//! use lakehouse_data::buckets::RegisterBucketOptions;
//!
//! let client = LakehouseDataClient::builder()
//!     .region(Region::UsSouth)
//!     .authenticator(Authenticator::bearer(token))
//!     .instance_id("crn:inst:42")
//!     .build()?;
//!
//! let options = RegisterBucketOptions::new("sales", "ibm_cos", "iceberg_data", "s3.example.test");
//! let created = client.register_bucket(&options).await?;
//! println!("registered {}", created.result().bucket.bucket_id);
//! ```
//!
//! Configuration can also come from `LAKEHOUSE_DATA_*` environment
//! variables via [`LakehouseDataClient::from_env`].

pub mod buckets;
pub mod catalogs;
pub mod client;
pub mod common;
pub mod databases;
pub mod engines;
pub mod grants;
pub mod metastores;
pub mod policies;
pub mod queries;
pub mod region;
pub mod schemas;
pub mod tables;

pub use client::{
    LakehouseDataClient, LakehouseDataClientBuilder, DEFAULT_SERVICE_NAME, DEFAULT_SERVICE_URL,
    INSTANCE_ID_HEADER,
};
pub use common::{SuccessEnvelope, SuccessResponse};
pub use region::Region;
