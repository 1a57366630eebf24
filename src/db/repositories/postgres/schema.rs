diesel::table! {
    posts (id) {
        id -> Int8,
        #[max_length = 255]
        title -> Varchar,
        content -> Text,
        #[max_length = 100]
        author -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}
