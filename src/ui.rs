use anyhow::{Context, Result};
use console::Term;
use rpassword::read_password;
use std::io::{self, Write};
use zeroize::Zeroizing;

/// Interactive capability the generation flow needs: one secret read
/// and one yes/no question. Kept behind a trait so the flow can run
/// against a scripted implementation with no terminal attached.
pub trait Prompt {
    /// Read a secret without echoing it.
    fn read_secret(&mut self, label: &str) -> Result<Zeroizing<String>>;

    /// Ask a yes/no question; defaults to no.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// The real terminal: `rpassword` for the secret, stderr for the
/// question so the answer never mixes into piped output.
pub struct Terminal;

impl Prompt for Terminal {
    fn read_secret(&mut self, label: &str) -> Result<Zeroizing<String>> {
        print!("{}: ", label);
        io::stdout().flush()?;

        let secret = read_password().context("Failed to read the salt")?;
        Ok(Zeroizing::new(secret))
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        let term = Term::stderr();
        term.write_str(&format!("{} [y/N]: ", question))?;
        term.flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;

        Ok(is_affirmative(response.trim()))
    }
}

pub fn is_affirmative(response: &str) -> bool {
    matches!(response.to_lowercase().as_str(), "y" | "yes")
}

/// Scripted prompt for tests: canned secret, canned answers, and a log
/// of every question asked.
#[cfg(test)]
pub struct Scripted {
    pub secret: String,
    pub answers: Vec<bool>,
    pub questions: Vec<String>,
}

#[cfg(test)]
impl Scripted {
    pub fn new(secret: &str, answers: Vec<bool>) -> Self {
        Self {
            secret: secret.to_string(),
            answers,
            questions: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompt for Scripted {
    fn read_secret(&mut self, _label: &str) -> Result<Zeroizing<String>> {
        Ok(Zeroizing::new(self.secret.clone()))
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.questions.push(question.to_string());
        if self.answers.is_empty() {
            anyhow::bail!("Scripted prompt ran out of answers");
        }
        Ok(self.answers.remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("YES"));
        assert!(is_affirmative("Yes"));

        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yep"));
        assert!(!is_affirmative("ja"));
    }

    #[test]
    fn test_scripted_prompt_records_questions() {
        let mut prompt = Scripted::new("hunter2", vec![true, false]);

        assert_eq!(*prompt.read_secret("Salt").unwrap(), "hunter2");
        assert!(prompt.confirm("Store this key?").unwrap());
        assert!(!prompt.confirm("Again?").unwrap());
        assert!(prompt.confirm("Out of answers?").is_err());

        assert_eq!(prompt.questions.len(), 3);
        assert_eq!(prompt.questions[0], "Store this key?");
    }
}
