//! Operator-facing alert text (Slack mrkdwn).

use chrono::{DateTime, Utc};

use crate::alert::types::AlertIntent;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

fn format_time(at: &DateTime<Utc>) -> String {
    at.format(TIME_FORMAT).to_string()
}

impl AlertIntent {
    /// Render the message body sent to the notifier.
    pub fn message(&self) -> String {
        match self {
            AlertIntent::Failover { from_pool, to_pool, timestamp } => format!(
                "*Failover Detected*\n\
                 Pool switched from *{from}* → *{to}*\n\
                 Time: {time}\n\n\
                 *Action Required:*\n\
                 • Check health of `{from}` container\n\
                 • Review logs: `docker logs app_{from}`\n\
                 • Verify application is recovering",
                from = from_pool,
                to = to_pool,
                time = format_time(timestamp),
            ),
            AlertIntent::ErrorRate {
                error_rate,
                error_count,
                total,
                threshold_percent,
                window_size,
                timestamp,
            } => format!(
                "*High Error Rate Detected*\n\
                 Error Rate: *{error_rate:.2}%* (threshold: {threshold_percent}%)\n\
                 Errors: {error_count} / {total} requests\n\
                 Window: Last {window_size} requests\n\
                 Time: {time}\n\n\
                 *Action Required:*\n\
                 • Check upstream application logs\n\
                 • Consider toggling to backup pool\n\
                 • Investigate root cause of 5xx errors",
                time = format_time(timestamp),
            ),
            AlertIntent::Recovery { error_rate, timestamp } => format!(
                "*Service Recovery*\n\
                 Error rate has improved: *{error_rate:.2}%*\n\
                 System is stabilizing\n\
                 Time: {time}",
                time = format_time(timestamp),
            ),
        }
    }
}
