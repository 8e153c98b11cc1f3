use anyhow::Result;
use rusqlite::{Connection, Row, params};
use uuid::Uuid;

use mandir_types::models::{PaymentStatus, RecordKind};

use crate::Database;
use crate::models::{
    BookingRow, ContactMessageRow, DonationRow, NewBooking, NewContactMessage, NewDonation,
    ProfileRow, UserRow,
};

const DONATION_COLUMNS: &str = "id, donor_name, email, phone, amount, donation_type, message, \
     payment_status, payment_id, user_id, created_at";

const BOOKING_COLUMNS: &str = "id, full_name, email, phone, pooja_service, booking_date, \
     booking_time, occasion, special_requests, amount, payment_status, payment_id, user_id, created_at";

impl Database {
    // -- Users & profiles --

    /// Create the account and its profile together; neither exists without the other.
    /// Returns `false` when the email is already registered.
    pub fn create_user_with_profile(
        &self,
        id: &str,
        email: &str,
        password_hash: &str,
        full_name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let tx = conn.unchecked_transaction()?;
            let inserted = tx.execute(
                "INSERT INTO users (id, email, password) VALUES (?1, ?2, ?3)",
                (id, email, password_hash),
            );
            match inserted {
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    return Ok(false);
                }
                other => {
                    other?;
                }
            }
            tx.execute(
                "INSERT INTO profiles (id, full_name, phone) VALUES (?1, ?2, ?3)",
                params![id, full_name, phone],
            )?;
            tx.commit()?;
            Ok(true)
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, email, password, created_at FROM users WHERE email = ?1",
                    [email],
                    |row| {
                        Ok(UserRow {
                            id: row.get(0)?,
                            email: row.get(1)?,
                            password: row.get(2)?,
                            created_at: row.get(3)?,
                        })
                    },
                )
                .optional()?;
            Ok(row)
        })
    }

    pub fn get_profile(&self, id: &str) -> Result<Option<ProfileRow>> {
        self.with_conn(|conn| query_profile(conn, id))
    }

    /// Update the given profile fields; `None` leaves a field unchanged.
    pub fn update_profile(
        &self,
        id: &str,
        full_name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<ProfileRow>> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE profiles
                 SET full_name = COALESCE(?2, full_name),
                     phone = COALESCE(?3, phone),
                     updated_at = datetime('now')
                 WHERE id = ?1",
                params![id, full_name, phone],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            query_profile(conn, id)
        })
    }

    // -- Contact messages --

    pub fn insert_contact_message(&self, msg: &NewContactMessage) -> Result<ContactMessageRow> {
        let id = Uuid::new_v4().to_string();
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO contact_messages (id, name, email, phone, message) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, msg.name, msg.email, msg.phone, msg.message],
            )?;
            let row = conn.query_row(
                "SELECT id, name, email, phone, message, created_at FROM contact_messages WHERE id = ?1",
                [&id],
                |row| {
                    Ok(ContactMessageRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                        phone: row.get(3)?,
                        message: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                },
            )?;
            Ok(row)
        })
    }

    // -- Donations --

    /// Insert a donation. Status is always `pending` at creation.
    pub fn create_donation(&self, donation: &NewDonation) -> Result<DonationRow> {
        let id = Uuid::new_v4().to_string();
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO donations
                    (id, donor_name, email, phone, amount, donation_type, message, payment_status, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    id,
                    donation.donor_name,
                    donation.email,
                    donation.phone,
                    donation.amount,
                    donation.donation_type,
                    donation.message,
                    PaymentStatus::Pending.as_str(),
                    donation.user_id.map(|u| u.to_string()),
                ],
            )?;
            query_donation(conn, &id)?
                .ok_or_else(|| anyhow::anyhow!("Donation {} vanished after insert", id))
        })
    }

    pub fn get_donation(&self, id: &str) -> Result<Option<DonationRow>> {
        self.with_conn(|conn| query_donation(conn, id))
    }

    // -- Pooja bookings --

    /// Insert a booking. Status is always `pending` at creation.
    pub fn create_booking(&self, booking: &NewBooking) -> Result<BookingRow> {
        let id = Uuid::new_v4().to_string();
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO pooja_bookings
                    (id, full_name, email, phone, pooja_service, booking_date, booking_time,
                     occasion, special_requests, amount, payment_status, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    id,
                    booking.full_name,
                    booking.email,
                    booking.phone,
                    booking.pooja_service,
                    booking.booking_date.format("%Y-%m-%d").to_string(),
                    booking.booking_time,
                    booking.occasion,
                    booking.special_requests,
                    booking.amount,
                    PaymentStatus::Pending.as_str(),
                    booking.user_id.to_string(),
                ],
            )?;
            query_booking(conn, &id)?
                .ok_or_else(|| anyhow::anyhow!("Booking {} vanished after insert", id))
        })
    }

    pub fn get_booking(&self, id: &str) -> Result<Option<BookingRow>> {
        self.with_conn(|conn| query_booking(conn, id))
    }

    pub fn list_bookings_for_user(&self, user_id: &str) -> Result<Vec<BookingRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {} FROM pooja_bookings WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
                BOOKING_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([user_id], booking_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Payments --

    /// Mark a donation or booking `completed` with the given payment id.
    ///
    /// Unconditional: a second call simply overwrites `payment_id`.
    /// Returns false when no such record exists.
    pub fn mark_payment_completed(&self, kind: RecordKind, id: &str, payment_id: &str) -> Result<bool> {
        let sql = match kind {
            RecordKind::Donation => {
                "UPDATE donations SET payment_status = ?1, payment_id = ?2 WHERE id = ?3"
            }
            RecordKind::Pooja => {
                "UPDATE pooja_bookings SET payment_status = ?1, payment_id = ?2 WHERE id = ?3"
            }
        };
        self.with_conn_mut(|conn| {
            let changed = conn.execute(sql, params![PaymentStatus::Completed.as_str(), payment_id, id])?;
            Ok(changed > 0)
        })
    }
}

fn query_profile(conn: &Connection, id: &str) -> Result<Option<ProfileRow>> {
    let row = conn
        .query_row(
            "SELECT id, full_name, phone, created_at, updated_at FROM profiles WHERE id = ?1",
            [id],
            |row| {
                Ok(ProfileRow {
                    id: row.get(0)?,
                    full_name: row.get(1)?,
                    phone: row.get(2)?,
                    created_at: row.get(3)?,
                    updated_at: row.get(4)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

fn query_donation(conn: &Connection, id: &str) -> Result<Option<DonationRow>> {
    let sql = format!("SELECT {} FROM donations WHERE id = ?1", DONATION_COLUMNS);
    let row = conn
        .query_row(&sql, [id], |row| {
            Ok(DonationRow {
                id: row.get(0)?,
                donor_name: row.get(1)?,
                email: row.get(2)?,
                phone: row.get(3)?,
                amount: row.get(4)?,
                donation_type: row.get(5)?,
                message: row.get(6)?,
                payment_status: row.get(7)?,
                payment_id: row.get(8)?,
                user_id: row.get(9)?,
                created_at: row.get(10)?,
            })
        })
        .optional()?;
    Ok(row)
}

fn query_booking(conn: &Connection, id: &str) -> Result<Option<BookingRow>> {
    let sql = format!("SELECT {} FROM pooja_bookings WHERE id = ?1", BOOKING_COLUMNS);
    let row = conn.query_row(&sql, [id], booking_from_row).optional()?;
    Ok(row)
}

fn booking_from_row(row: &Row<'_>) -> rusqlite::Result<BookingRow> {
    Ok(BookingRow {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        pooja_service: row.get(4)?,
        booking_date: row.get(5)?,
        booking_time: row.get(6)?,
        occasion: row.get(7)?,
        special_requests: row.get(8)?,
        amount: row.get(9)?,
        payment_status: row.get(10)?,
        payment_id: row.get(11)?,
        user_id: row.get(12)?,
        created_at: row.get(13)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
