//! HTML bodies for the two contact emails.
//!
//! Field values are interpolated as-is; nothing here escapes HTML.

use super::OutboundEmail;
use crate::models::ContactSubmission;

pub const CONFIRMATION_SUBJECT: &str = "Confirmation de votre message";

pub fn notification_subject(submission: &ContactSubmission) -> String {
    format!("Nouveau message de {}: {}", submission.name, submission.subject)
}

/// Message for the site owner carrying everything the visitor typed.
pub fn notification(sender: &str, owner: &str, submission: &ContactSubmission) -> OutboundEmail {
    let html = format!(
        r#"
<h2>Nouveau message de contact</h2>
<p><strong>De:</strong> {name} ({email})</p>
<p><strong>Sujet:</strong> {subject}</p>
<p><strong>Message:</strong></p>
<p>{message}</p>
<hr>
<p><em>Envoyé depuis le formulaire de contact de votre portfolio</em></p>
"#,
        name = submission.name,
        email = submission.email,
        subject = submission.subject,
        message = submission.message,
    );

    OutboundEmail {
        from: sender.to_string(),
        to: owner.to_string(),
        subject: notification_subject(submission),
        html,
    }
}

/// Acknowledgement sent back to the visitor.
pub fn confirmation(
    sender: &str,
    submission: &ContactSubmission,
    team_name: &str,
    response_days: u32,
) -> OutboundEmail {
    let html = format!(
        r#"
<h2>Bonjour {name},</h2>
<p>Merci de nous avoir contactés ! Nous avons bien reçu votre demande : « {subject} » et nous ferons tout notre possible pour la traiter sous {days} jours ouvrés.</p>
<p><strong>Votre message :</strong></p>
<p>{message}</p>
<p>Cordialement,<br>L'équipe {team}</p>
"#,
        name = submission.name,
        subject = submission.subject,
        days = response_days,
        message = submission.message,
        team = team_name,
    );

    OutboundEmail {
        from: sender.to_string(),
        to: submission.email.clone(),
        subject: CONFIRMATION_SUBJECT.to_string(),
        html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ContactSubmission {
        ContactSubmission::new(
            "Alice",
            "alice@example.com",
            "Projet mobile",
            "Bonjour, je voudrais discuter d'un projet mobile pour mon entreprise.",
        )
    }

    #[test]
    fn test_notification() {
        let email = notification("site@example.com", "owner@example.com", &submission());

        assert_eq!(email.from, "site@example.com");
        assert_eq!(email.to, "owner@example.com");
        assert_eq!(email.subject, "Nouveau message de Alice: Projet mobile");
        assert!(email.html.contains("<strong>De:</strong> Alice (alice@example.com)"));
        assert!(email.html.contains("Projet mobile"));
        assert!(email.html.contains("je voudrais discuter d'un projet mobile"));
    }

    #[test]
    fn test_confirmation() {
        let email = confirmation("site@example.com", &submission(), "ASZOTHIAM", 3);

        assert_eq!(email.from, "site@example.com");
        assert_eq!(email.to, "alice@example.com");
        assert_eq!(email.subject, CONFIRMATION_SUBJECT);
        assert!(email.html.contains("Bonjour Alice,"));
        assert!(email.html.contains("« Projet mobile »"));
        assert!(email.html.contains("sous 3 jours ouvrés"));
        assert!(email.html.contains("L'équipe ASZOTHIAM"));
    }

    #[test]
    fn test_fields_are_not_escaped() {
        let mut raw = submission();
        raw.name = "<b>Alice</b>".to_string();

        let email = notification("site@example.com", "owner@example.com", &raw);
        assert!(email.html.contains("<b>Alice</b>"));
    }
}
