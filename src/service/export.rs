//! CSV export of ticket bookings.

use crate::domain::Booking;

/// Header row of the bookings export.
pub const BOOKINGS_CSV_HEADER: [&str; 8] = [
    "Booking ID",
    "Event ID",
    "Attendee Name",
    "Email",
    "Ticket Price",
    "Currency",
    "Booking Time",
    "Status",
];

/// Download name sent in `Content-Disposition`.
pub const BOOKINGS_CSV_FILENAME: &str = "ticket_bookings.csv";

/// Renders bookings as CSV with CRLF line endings. Fields are quoted only
/// when they contain a comma, quote or line break.
#[must_use]
pub fn bookings_csv(bookings: &[Booking]) -> String {
    let mut out = String::new();
    push_row(&mut out, BOOKINGS_CSV_HEADER.iter().map(|h| (*h).to_string()));
    for b in bookings {
        push_row(
            &mut out,
            [
                b.id.to_string(),
                b.event_id.to_string(),
                b.attendee_name.clone(),
                b.attendee_email.clone(),
                b.ticket_price.to_string(),
                b.currency.clone(),
                b.booking_time.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
                b.status.as_str().to_string(),
            ],
        );
    }
    out
}

fn push_row(out: &mut String, fields: impl IntoIterator<Item = String>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\r', '\n']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(&field);
        }
    }
    out.push_str("\r\n");
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::NewBooking;
    use crate::domain::event::now_local;

    fn booking(name: &str) -> Booking {
        Booking::confirm(
            &[],
            NewBooking {
                event_id: 2,
                attendee_name: name.to_string(),
                attendee_email: "guest@example.com".to_string(),
                ticket_price: 450_000,
                currency: "INR".to_string(),
            },
            now_local(),
        )
    }

    #[test]
    fn header_only_when_empty() {
        assert_eq!(
            bookings_csv(&[]),
            "Booking ID,Event ID,Attendee Name,Email,Ticket Price,Currency,Booking Time,Status\r\n"
        );
    }

    #[test]
    fn quotes_fields_with_commas_and_quotes() {
        let csv = bookings_csv(&[booking("Doe, \"JD\" John")]);
        let Some(row) = csv.lines().nth(1) else {
            panic!("one data row expected");
        };
        assert!(row.starts_with("1,2,\"Doe, \"\"JD\"\" John\",guest@example.com,450000,INR,"));
        assert!(row.ends_with(",confirmed"));
    }
}
