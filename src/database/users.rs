use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use crate::domain::AccountFlags;

/// Flags for an authenticated account. Unknown ids fall back to defaults;
/// account creation itself belongs to the out-of-scope auth layer.
pub fn get_flags(conn: &mut DbConn, user_id: i64) -> Result<AccountFlags> {
    let sql = "SELECT include_very_hard FROM users WHERE id = ?1";
    let include_very_hard: Option<bool> = conn
        .query_row(sql, params![user_id], |row| row.get(0))
        .optional()
        .context("Failed to query account flags")?;

    Ok(AccountFlags {
        include_very_hard: include_very_hard.unwrap_or(false),
    })
}

pub fn set_include_very_hard(
    conn: &mut DbConn,
    user_id: i64,
    include_very_hard: bool,
) -> Result<()> {
    let sql = "INSERT INTO users (id, include_very_hard) VALUES (?1, ?2) \
               ON CONFLICT (id) DO UPDATE SET include_very_hard = excluded.include_very_hard";
    conn.execute(sql, params![user_id, include_very_hard])
        .context("Failed to update account flags")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, get_connection, setup};

    #[test]
    fn unknown_users_get_default_flags() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::init_database(&mut conn).unwrap();

        let flags = get_flags(&mut conn, 42).unwrap();
        assert!(!flags.include_very_hard);
    }

    #[test]
    fn flags_survive_a_toggle_round_trip() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::init_database(&mut conn).unwrap();

        set_include_very_hard(&mut conn, 7, true).unwrap();
        assert!(get_flags(&mut conn, 7).unwrap().include_very_hard);

        set_include_very_hard(&mut conn, 7, false).unwrap();
        assert!(!get_flags(&mut conn, 7).unwrap().include_very_hard);
    }
}
