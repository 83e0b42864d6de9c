//! Client-facing event names for pushed notifications.

/// Maps a notification kind as received on the ingress to the event name
/// clients subscribe to. Unknown kinds fall back to the generic name.
pub fn push_event_name(kind: &str) -> &'static str {
    match kind {
        "TASK_CREATED" => "task:created",
        "TASK_UPDATED" => "task:updated",
        "COMMENT_CREATED" => "comment:created",
        _ => "notification",
    }
}

/// Room every authenticated session of a user joins.
pub fn user_room(user_id: &str) -> String {
    format!("user:{}", user_id)
}
