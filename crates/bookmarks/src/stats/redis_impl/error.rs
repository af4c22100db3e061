//! Redis error mapping to StatsError.

use bookmarks_core::stats::StatsError;

/// Maps Redis errors to StatsError.
pub fn map_redis_error(err: redis::RedisError) -> StatsError {
    if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
        StatsError::ConnectionFailed(err.to_string())
    } else if err.kind() == redis::ErrorKind::TypeError {
        StatsError::InvalidValue(err.to_string())
    } else {
        StatsError::OperationFailed(err.to_string())
    }
}
