//! Password strength rules applied on registration

const COMMON_PASSWORDS: &[&str] = &[
    "password", "password1", "password123", "12345678", "123456789", "1234567890", "qwerty123",
    "qwertyuiop", "iloveyou", "sunshine", "princess", "football", "baseball", "welcome1",
    "admin123", "letmein1", "abc12345", "trustno1", "dragon123", "monkey123", "passw0rd",
    "superman", "starwars", "whatever", "michael1", "computer", "internet", "changeme",
];

/// Minimum length and the checks that reject weak passwords.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Every rule the password breaks; empty when it is acceptable.
    pub fn violations(&self, password: &str, username: &str, email: &str) -> Vec<String> {
        let mut problems = Vec::new();
        let lowered = password.to_lowercase();

        if too_similar(&lowered, username) {
            problems.push("The password is too similar to the username.".to_string());
        } else if too_similar(&lowered, email_local_part(email)) {
            problems.push("The password is too similar to the email address.".to_string());
        }

        if password.chars().count() < self.min_length {
            problems.push(format!(
                "This password is too short. It must contain at least {} characters.",
                self.min_length
            ));
        }

        if COMMON_PASSWORDS.contains(&lowered.as_str()) {
            problems.push("This password is too common.".to_string());
        }

        if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
            problems.push("This password is entirely numeric.".to_string());
        }

        problems
    }
}

fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or_default()
}

/// Case-insensitive containment in either direction. Attributes shorter
/// than three characters are ignored.
fn too_similar(lowered_password: &str, attribute: &str) -> bool {
    let attribute = attribute.trim().to_lowercase();
    if attribute.chars().count() < 3 || lowered_password.is_empty() {
        return false;
    }
    lowered_password.contains(&attribute) || attribute.contains(lowered_password)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(password: &str) -> Vec<String> {
        PasswordPolicy::default().violations(password, "ann", "ann@example.com")
    }

    #[test]
    fn strong_password_passes() {
        assert!(check("Tr1cky-Horse!").is_empty());
    }

    #[test]
    fn short_password_rejected() {
        let problems = check("Ab1!x");
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("at least 8 characters"));
    }

    #[test]
    fn numeric_and_common_rejected() {
        let problems = check("12345678");
        assert!(problems.iter().any(|p| p.contains("too common")));
        assert!(problems.iter().any(|p| p.contains("entirely numeric")));

        assert!(check("PassWord1").iter().any(|p| p.contains("too common")));
    }

    #[test]
    fn similar_to_username_or_email() {
        let policy = PasswordPolicy::default();
        let problems = policy.violations("janedoe2026", "JaneDoe", "x@example.com");
        assert!(problems.iter().any(|p| p.contains("username")));

        let problems = policy.violations("Mailbox-Jane", "someone", "mailbox@example.com");
        assert!(problems.iter().any(|p| p.contains("email address")));
    }

    #[test]
    fn configurable_minimum() {
        let policy = PasswordPolicy::new(12);
        let problems = policy.violations("Tr1cky-Horse", "ann", "ann@example.com");
        assert!(problems.is_empty());
        let problems = policy.violations("Tr1cky-Hors", "ann", "ann@example.com");
        assert!(problems[0].contains("at least 12 characters"));
    }
}
