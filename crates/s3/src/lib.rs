//! cos-upload-s3: COS adapter for the cos-upload CI helper
//!
//! This crate provides the implementation of the ObjectStore trait using the
//! aws-sdk-s3 crate against COS's S3-compatible API. It is the only crate that
//! directly depends on the AWS SDK.

pub mod client;

pub use client::CosClient;
