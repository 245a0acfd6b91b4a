//! 可观测性模块
//!
//! 提供 tracing 订阅器初始化与数据源解析指标。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::LoggingConfig;
use crate::error::{AppError, Result};
use crate::storage::SourceKind;

/// 日志文件名前缀
pub const LOG_FILE_PREFIX: &str = "agentcircle.log";

/// 安装全局 tracing 订阅器
///
/// `RUST_LOG` 优先于配置中的级别。配置了 `log_dir` 时按天滚动写入文件，
/// 返回的 guard 需要在进程退出前保持存活。
pub fn init_tracing(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AppError::Config(format!("invalid log level {:?}: {}", config.level, e)))?;

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true);

    let installed = if config.structured {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| AppError::Config(format!("tracing subscriber: {}", e)))?;

    Ok(guard)
}

// ===== Resolution Metrics =====

/// 数据源解析指标
#[derive(Clone, Default, Debug)]
pub struct ResolutionMetrics {
    pub remote_hits: Arc<AtomicU64>,
    pub fixture_hits: Arc<AtomicU64>,
    /// 由非首选数据源给出结果的次数
    pub fallbacks: Arc<AtomicU64>,
    pub decode_failures: Arc<AtomicU64>,
    /// 所有数据源都失败的次数
    pub unresolved: Arc<AtomicU64>,
}

/// 指标快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub remote_hits: u64,
    pub fixture_hits: u64,
    pub fallbacks: u64,
    pub decode_failures: u64,
    pub unresolved: u64,
}

impl ResolutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次成功解析
    pub fn record_hit(&self, kind: SourceKind, fallback: bool) {
        match kind {
            SourceKind::Remote => self.remote_hits.fetch_add(1, Ordering::SeqCst),
            SourceKind::Fixture => self.fixture_hits.fetch_add(1, Ordering::SeqCst),
        };
        if fallback {
            self.fallbacks.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// 记录远端数据结构不符
    pub fn record_decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录解析失败
    pub fn record_unresolved(&self) {
        self.unresolved.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            remote_hits: self.remote_hits.load(Ordering::SeqCst),
            fixture_hits: self.fixture_hits.load(Ordering::SeqCst),
            fallbacks: self.fallbacks.load(Ordering::SeqCst),
            decode_failures: self.decode_failures.load(Ordering::SeqCst),
            unresolved: self.unresolved.load(Ordering::SeqCst),
        }
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        let s = self.snapshot();
        format!(
            r#"# HELP agentcircle_source_hits_total Operations answered per data source
# TYPE agentcircle_source_hits_total counter
agentcircle_source_hits_total{{source="remote"}} {}
agentcircle_source_hits_total{{source="fixture"}} {}
# HELP agentcircle_fallbacks_total Operations answered by a fallback source
# TYPE agentcircle_fallbacks_total counter
agentcircle_fallbacks_total {}
# HELP agentcircle_decode_failures_total Remote responses that did not match the expected shape
# TYPE agentcircle_decode_failures_total counter
agentcircle_decode_failures_total {}
# HELP agentcircle_unresolved_total Operations no data source could answer
# TYPE agentcircle_unresolved_total counter
agentcircle_unresolved_total {}
"#,
            s.remote_hits, s.fixture_hits, s.fallbacks, s.decode_failures, s.unresolved,
        )
    }
}
