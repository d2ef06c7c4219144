use admins_core::models::{AdminProfile, NewAdminProfile};
use sqlx::{PgPool, Postgres};

pub struct AdminProfilesRepository;

impl AdminProfilesRepository {
    /// Usernames starting with `prefix`, compared case-insensitively.
    #[tracing::instrument(name = "admin_profiles_repository.find_usernames_by_prefix", skip(pool), err)]
    pub async fn find_usernames_by_prefix(
        prefix: &str,
        pool: &PgPool,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<Postgres, String>(
            r#"
                SELECT username
                FROM admin_profiles
                WHERE lower(username) LIKE $1 ESCAPE '\'
                ORDER BY username ASC
            "#,
        )
        .bind(format!("{}%", escape_like(&prefix.to_lowercase())))
        .fetch_all(pool)
        .await
    }

    #[tracing::instrument(
        name = "admin_profiles_repository.create_admin_profile",
        skip_all,
        fields(username = %profile.username, auth_user_id = %profile.auth_user_id),
        err
    )]
    pub async fn create_admin_profile(
        profile: &NewAdminProfile,
        pool: &PgPool,
    ) -> Result<AdminProfile, sqlx::Error> {
        sqlx::query_as::<Postgres, AdminProfile>(
            r#"
                INSERT INTO admin_profiles (
                    auth_user_id, username, first_name, last_name, email, phone_number, role, status
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id, auth_user_id, username, first_name, last_name, email, phone_number,
                    role, status, created_at, updated_at
            "#,
        )
        .bind(profile.auth_user_id)
        .bind(&profile.username)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.email)
        .bind(&profile.phone_number)
        .bind(profile.role)
        .bind(profile.status)
        .fetch_one(pool)
        .await
    }

    #[tracing::instrument(name = "admin_profiles_repository.find_admin_profile_by_username", skip(pool), err)]
    pub async fn find_admin_profile_by_username(
        username: &str,
        pool: &PgPool,
    ) -> Result<Option<AdminProfile>, sqlx::Error> {
        sqlx::query_as::<Postgres, AdminProfile>(
            r#"
                SELECT id, auth_user_id, username, first_name, last_name, email, phone_number,
                    role, status, created_at, updated_at
                FROM admin_profiles
                WHERE lower(username) = lower($1)
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }
}

/// Escapes `LIKE` wildcards so a prefix only ever matches literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(escape_like("aareyes"), "aareyes");
        assert_eq!(escape_like("a_b%c"), r"a\_b\%c");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
    }
}
