use crate::booking::Booking;
use crate::mailer::Email;

// Stage notifications for the booking lifecycle. Plain formatted HTML,
// no template engine: the content mirrors what the rental owner already
// receives today and is not a contract of this system.

pub fn owner_new_booking(from: &str, owner: &str, booking: &Booking) -> Email {
    let html = format!(
        "<h2>New Booking Request</h2>\
         <p><strong>Vehicle:</strong> {vehicle}</p>\
         <p><strong>Dates:</strong> {start} → {end}</p>\
         <p><strong>Times:</strong> {pickup} → {dropoff}</p>\
         <p><strong>Name:</strong> {name}</p>\
         <p><strong>Email:</strong> {email}</p>\
         <p><strong>Phone:</strong> {phone}</p>\
         <p><strong>Age:</strong> {age}</p>\
         <p><strong>Address:</strong> {address}</p>\
         <p><strong>Licence:</strong> {licence}</p>\
         <p><strong>ID File:</strong> {id_file}</p>\
         <p><strong>Notes:</strong> {notes}</p>\
         <hr/>\
         <p>The deposit will next be requested from the customer.</p>\
         <p>You will get another email once the deposit has been paid.</p>",
        vehicle = booking.vehicle_id,
        start = booking.start_date,
        end = booking.end_date,
        pickup = booking.pickup_time,
        dropoff = booking.dropoff_time,
        name = booking.full_name,
        email = booking.email,
        phone = booking.phone,
        age = booking.age,
        address = booking.address,
        licence = booking.license_number,
        id_file = booking.id_document.as_deref().unwrap_or("None"),
        notes = if booking.notes.is_empty() {
            "None"
        } else {
            &booking.notes
        },
    );

    Email {
        from: from.to_string(),
        to: owner.to_string(),
        subject: format!(
            "New Booking Request - {} ({} → {})",
            booking.vehicle_id, booking.start_date, booking.end_date
        ),
        html,
    }
}

pub fn owner_deposit_paid(from: &str, owner: &str, booking: &Booking, approve_link: &str) -> Email {
    let html = format!(
        "<h2>Deposit received</h2>\
         <p>The deposit for booking <strong>{id}</strong> has been paid.</p>\
         <p><strong>Vehicle:</strong> {vehicle}</p>\
         <p><strong>Customer:</strong> {name} ({email})</p>\
         <p><strong>Dates:</strong> {start} → {end}</p>\
         <hr>\
         <p><a href=\"{link}\">CLICK HERE TO APPROVE BOOKING</a></p>",
        id = booking.id,
        vehicle = booking.vehicle_id,
        name = booking.full_name,
        email = booking.email,
        start = booking.start_date,
        end = booking.end_date,
        link = approve_link,
    );

    Email {
        from: from.to_string(),
        to: owner.to_string(),
        subject: format!("Deposit Paid - Booking {}", booking.id),
        html,
    }
}

pub fn customer_deposit_received(from: &str, booking: &Booking) -> Email {
    let html = format!(
        "<h2>Thank you for your deposit</h2>\
         <p>Your deposit has been successfully received.</p>\
         <p>Your booking is now <strong>awaiting final approval</strong>.</p>\
         <p><strong>Booking ID:</strong> {id}</p>\
         <p><strong>Vehicle:</strong> {vehicle}</p>\
         <p><strong>Dates:</strong> {start} → {end}</p>\
         <p>You will receive a confirmation email once your booking is approved.</p>",
        id = booking.id,
        vehicle = booking.vehicle_id,
        start = booking.start_date,
        end = booking.end_date,
    );

    Email {
        from: from.to_string(),
        to: booking.email.clone(),
        subject: "Deposit received – Awaiting approval".to_string(),
        html,
    }
}

pub fn customer_booking_confirmed(
    from: &str,
    booking: &Booking,
    pickup_instructions: &str,
) -> Email {
    let html = format!(
        "<h2>Booking Confirmed</h2>\
         <p>Your car hire booking is now confirmed.</p>\
         <p><strong>Booking ID:</strong> {id}</p>\
         <p><strong>Vehicle:</strong> {vehicle}</p>\
         <p><strong>Dates:</strong> {start} → {end}</p>\
         <p><strong>Pickup Time:</strong> {pickup}</p>\
         <p><strong>Dropoff Time:</strong> {dropoff}</p>\
         <h3>Pickup Details</h3>\
         <p>{instructions}</p>\
         <br>\
         <p>Thank you for choosing our service!</p>",
        id = booking.id,
        vehicle = booking.vehicle_id,
        start = booking.start_date,
        end = booking.end_date,
        pickup = booking.pickup_time,
        dropoff = booking.dropoff_time,
        instructions = pickup_instructions,
    );

    Email {
        from: from.to_string(),
        to: booking.email.clone(),
        subject: "Your Booking is Confirmed".to_string(),
        html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BookingDetails, BookingStatus};
    use chrono::NaiveDate;

    fn booking() -> Booking {
        Booking::new(BookingDetails {
            vehicle_id: "V1".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            pickup_time: "10:00".to_string(),
            dropoff_time: "10:00".to_string(),
            full_name: "A B".to_string(),
            email: "a@b.com".to_string(),
            phone: "123".to_string(),
            age: 30,
            address: "X".to_string(),
            license_number: "L1".to_string(),
            notes: String::new(),
            id_document: None,
        })
    }

    #[test]
    fn owner_intake_mail_carries_full_detail() {
        let email = owner_new_booking("noreply@x", "owner@x", &booking());
        assert_eq!(email.to, "owner@x");
        assert!(email.subject.contains("V1"));
        for needle in ["A B", "a@b.com", "123", "30", "L1", "2024-06-01"] {
            assert!(email.html.contains(needle), "missing {needle}");
        }
        assert!(email.html.contains("<strong>Notes:</strong> None"));
    }

    #[test]
    fn approval_mail_embeds_the_action_link() {
        let b = booking();
        let link = format!("https://rentals.example/api/approve?bookingId={}", b.id);
        let email = owner_deposit_paid("noreply@x", "owner@x", &b, &link);
        assert!(email.html.contains(&link));
        assert!(email.subject.contains(&b.id.to_string()));
    }

    #[test]
    fn customer_mails_go_to_the_customer() {
        let mut b = booking();
        b.transition(BookingStatus::DepositPaid);

        let received = customer_deposit_received("noreply@x", &b);
        assert_eq!(received.to, "a@b.com");
        assert!(received.html.contains("awaiting final approval"));

        b.transition(BookingStatus::Confirmed);
        let confirmed = customer_booking_confirmed("noreply@x", &b, "Collect at the yard gate.");
        assert_eq!(confirmed.to, "a@b.com");
        assert!(confirmed.html.contains("Collect at the yard gate."));
        assert!(confirmed.html.contains("10:00"));
    }
}
