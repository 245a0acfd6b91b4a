//! 存储层模块
//!
//! 数据源抽象以及两种实现：远端 HTTP 服务与本地数据集。

pub mod dataset;
pub mod fixture;
pub mod remote;
pub mod source;

pub use dataset::Dataset;
pub use fixture::FixtureSource;
pub use remote::RemoteSource;
pub use source::{DataSource, SourceChain, SourceKind};
