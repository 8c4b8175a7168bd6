//! Diesel schema for task board persistence.

diesel::table! {
    /// Task cards, one row per task.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning team.
        team_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Column status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Optional assignee.
        assigned_to -> Nullable<Uuid>,
        /// Creating user.
        created_by -> Uuid,
        /// Position within the `(team_id, status)` column.
        position -> Int4,
        /// Completion timestamp, set iff status is `done`.
        completed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tags owned by a task, cascade-deleted with it.
    task_tags (id) {
        /// Tag row identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Tag name.
        #[max_length = 50]
        name -> Varchar,
        /// Tag color.
        #[max_length = 20]
        color -> Varchar,
        /// Display order within the task.
        sort_order -> Int4,
    }
}

diesel::table! {
    /// Team members.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Team the user belongs to.
        team_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Email address.
        #[max_length = 255]
        email -> Varchar,
        /// Optional avatar color.
        #[max_length = 20]
        avatar_color -> Nullable<Varchar>,
    }
}

diesel::joinable!(task_tags -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_tags, users);
