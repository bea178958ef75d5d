// Error classification: connection-level vs everything else
//
// A connection-level failure means the transport/session to the database is
// broken or unreachable. Only those failures may trigger a pool reset and
// bounded retry. Constraint violations, bad statements and decode errors are
// caller errors and must propagate untouched.

use sqlx::error::DatabaseError;

/// SQLite primary result codes meaning the database file or session is
/// unreachable. Extended result codes carry the primary code in the low byte
/// (e.g. 266 = SQLITE_IOERR_READ reduces to 10 = SQLITE_IOERR).
const CONN_PRIMARY_CODES: [u32; 4] = [
    10, // SQLITE_IOERR
    14, // SQLITE_CANTOPEN
    15, // SQLITE_PROTOCOL
    26, // SQLITE_NOTADB
];

/// Known driver message signatures checked when no usable code is present
/// or the code is not in the allow-list.
const CONN_MESSAGE_SIGNATURES: [&str; 4] = [
    "UNABLE TO OPEN DATABASE",
    "DISK I/O ERROR",
    "NOT A DATABASE",
    "DATABASE DISK IMAGE IS MALFORMED",
];

/// Return true when the error indicates a broken or unreachable
/// transport/session. Pure, no side effects.
pub fn is_connection_error(err: &sqlx::Error) -> bool {
    match err {
        // Transport and pool-level failures from the driver itself
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => true,

        sqlx::Error::Database(db_err) => is_connection_db_error(db_err.as_ref()),

        // RowNotFound, Decode, ColumnNotFound, Configuration, ...
        _ => false,
    }
}

fn is_connection_db_error(db_err: &dyn DatabaseError) -> bool {
    if let Some(code) = db_err.code() {
        if let Ok(n) = code.as_ref().parse::<u32>() {
            if CONN_PRIMARY_CODES.contains(&(n & 0xff)) {
                return true;
            }
        }
    }

    let msg = db_err.message().to_uppercase();
    CONN_MESSAGE_SIGNATURES.iter().any(|sig| msg.contains(sig))
}
