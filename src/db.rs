//! Action logging against the MySQL datastore.
//!
//! Two tables: an insert-only device-info snapshot table and the action
//! log. Both are created idempotently on startup. A connection failure
//! at startup is fatal (exit code 1); every later failure is a
//! recoverable warning - the triggering operation's own success or
//! failure is unaffected. One connection per menu session, no pooling,
//! each write fire-and-forget.

use crate::adb::DeviceInfo;
use crate::config::DatabaseConfig;
use crate::error::DbError;
use mysql::prelude::Queryable;
use mysql::{Conn, OptsBuilder};
use tracing::{info, warn};

const CREATE_DEVICES_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS devices (
    id INT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
    serial VARCHAR(64) NOT NULL,
    model VARCHAR(128) NOT NULL,
    brand VARCHAR(64) NOT NULL,
    device VARCHAR(64) NOT NULL,
    android_version VARCHAR(32) NOT NULL,
    sdk_version VARCHAR(16) NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

const CREATE_ACTION_LOG_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS action_log (
    id INT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
    device_name VARCHAR(128) NOT NULL,
    action VARCHAR(64) NOT NULL,
    result VARCHAR(255) NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

/// One row of the action log, as read back for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLogEntry {
    pub device_name: String,
    pub action: String,
    pub result: String,
    pub created_at: String,
}

/// Session-scoped handle to the relational log store.
pub struct ActionLogger {
    conn: Conn,
}

impl ActionLogger {
    /// Connect and create the schema idempotently.
    pub fn connect(cfg: &DatabaseConfig) -> Result<Self, DbError> {
        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(cfg.host.clone()))
            .tcp_port(cfg.port)
            .user(Some(cfg.user.clone()))
            .pass(Some(cfg.password.clone()));

        let mut conn =
            Conn::new(opts).map_err(|e| DbError::Connection(e.to_string()))?;

        conn.query_drop(format!(
            "CREATE DATABASE IF NOT EXISTS `{}`",
            cfg.schema
        ))
        .map_err(|e| DbError::Connection(e.to_string()))?;
        conn.query_drop(format!("USE `{}`", cfg.schema))
            .map_err(|e| DbError::Connection(e.to_string()))?;
        conn.query_drop(CREATE_DEVICES_TABLE)
            .map_err(|e| DbError::Connection(e.to_string()))?;
        conn.query_drop(CREATE_ACTION_LOG_TABLE)
            .map_err(|e| DbError::Connection(e.to_string()))?;

        info!(host = %cfg.host, schema = %cfg.schema, "connected to action log store");
        Ok(Self { conn })
    }

    /// Insert a device-info snapshot (insert-only table).
    pub fn record_device(&mut self, info: &DeviceInfo) -> Result<(), DbError> {
        self.conn
            .exec_drop(
                "INSERT INTO devices \
                 (serial, model, brand, device, android_version, sdk_version) \
                 VALUES (?, ?, ?, ?, ?, ?)",
                (
                    &info.serial,
                    &info.model,
                    &info.brand,
                    &info.device,
                    &info.android_version,
                    &info.sdk_version,
                ),
            )
            .map_err(|e| DbError::Recoverable(e.to_string()))
    }

    /// Append one action-log row; the timestamp is the write time
    /// (database default).
    pub fn log_action(
        &mut self,
        device_name: &str,
        action: &str,
        result: &str,
    ) -> Result<(), DbError> {
        self.conn
            .exec_drop(
                "INSERT INTO action_log (device_name, action, result) VALUES (?, ?, ?)",
                (device_name, action, result),
            )
            .map_err(|e| DbError::Recoverable(e.to_string()))
    }

    /// Log an action, swallowing failures: a logging failure must never
    /// abort the calling operation.
    pub fn log_action_best_effort(&mut self, device_name: &str, action: &str, result: &str) {
        if let Err(e) = self.log_action(device_name, action, result) {
            warn!("action log write failed: {e}");
        }
    }

    /// Most recent action-log rows, newest first.
    pub fn recent_actions(&mut self, limit: u32) -> Result<Vec<ActionLogEntry>, DbError> {
        let rows: Vec<(String, String, String, String)> = self
            .conn
            .exec(
                "SELECT device_name, action, result, CAST(created_at AS CHAR) \
                 FROM action_log ORDER BY id DESC LIMIT ?",
                (limit,),
            )
            .map_err(|e| DbError::Recoverable(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(device_name, action, result, created_at)| ActionLogEntry {
                device_name,
                action,
                result,
                created_at,
            })
            .collect())
    }
}
