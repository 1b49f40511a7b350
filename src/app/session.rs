//! Line-oriented form session: one command per line on the reader, rendered
//! output on the writer. Lookups run as background tasks so the form stays
//! editable while a search is in flight.

use crate::core::controller::FormController;
use crate::domain::model::{FieldName, RawAddressRecord, SearchTicket};
use crate::domain::ports::{AddressBook, AddressLookup};
use crate::utils::error::{AppError, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

pub const HELP: &str = "\
Commands:
  set <field> <value>   set postCode, houseNumber, firstName or lastName
  find                  search addresses for the current postcode and house number
  wait                  wait for the running search to finish
  select <n|id>         pick a search result by number or id
  add                   add the selected address with the names to the address book
  remove <id>           remove an address from the address book
  clear                 clear all fields, results, errors and the address book
  show                  show the form state
  book                  show the address book
  help                  show this help
  quit                  leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Set { field: FieldName, value: String },
    Find,
    Wait,
    Select(String),
    Add,
    Remove(String),
    Clear,
    Show,
    Book,
    Help,
    Quit,
}

/// `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> std::result::Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            if field.is_empty() {
                return Err("usage: set <field> <value>".to_string());
            }
            SessionCommand::Set {
                field: field.parse()?,
                value: value.to_string(),
            }
        }
        "find" => SessionCommand::Find,
        "wait" => SessionCommand::Wait,
        "select" if !rest.is_empty() => SessionCommand::Select(rest.to_string()),
        "select" => return Err("usage: select <n|id>".to_string()),
        "add" => SessionCommand::Add,
        "remove" if !rest.is_empty() => SessionCommand::Remove(rest.to_string()),
        "remove" => return Err("usage: remove <id>".to_string()),
        "clear" => SessionCommand::Clear,
        "show" => SessionCommand::Show,
        "book" => SessionCommand::Book,
        "help" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("unknown command '{}', try `help`", other)),
    };

    Ok(Some(command))
}

type SearchOutcome = (SearchTicket, Result<Vec<RawAddressRecord>>);

pub struct Session<L, B, W>
where
    L: AddressLookup + 'static,
    B: AddressBook,
    W: Write,
{
    controller: FormController<L, B>,
    out: W,
    outcomes_tx: mpsc::UnboundedSender<SearchOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<SearchOutcome>,
    in_flight: usize,
}

impl<L, B, W> Session<L, B, W>
where
    L: AddressLookup + 'static,
    B: AddressBook,
    W: Write,
{
    pub fn new(controller: FormController<L, B>, out: W) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            out,
            outcomes_tx,
            outcomes_rx,
            in_flight: 0,
        }
    }

    pub fn controller(&self) -> &FormController<L, B> {
        &self.controller
    }

    pub fn into_parts(self) -> (FormController<L, B>, W) {
        (self.controller, self.out)
    }

    /// Runs until `quit` or end of input. Searches still running at the end
    /// of input are waited for.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, reader: R) -> Result<()> {
        let mut lines = reader.lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        self.settle().await?;
                        break;
                    };
                    match parse_command(&line) {
                        Ok(Some(SessionCommand::Quit)) => break,
                        Ok(Some(command)) => self.execute(command).await?,
                        Ok(None) => {}
                        Err(message) => writeln!(self.out, "{}", message)?,
                    }
                }
                Some(outcome) = self.outcomes_rx.recv(), if self.in_flight > 0 => {
                    self.apply_outcome(outcome)?;
                }
            }
        }

        Ok(())
    }

    pub async fn execute(&mut self, command: SessionCommand) -> Result<()> {
        match command {
            SessionCommand::Set { field, value } => {
                self.controller.set_field(field, value);
            }
            SessionCommand::Find => self.start_search()?,
            SessionCommand::Wait => self.settle().await?,
            SessionCommand::Select(choice) => self.select(&choice)?,
            SessionCommand::Add => match self.controller.submit_enrollment() {
                Ok(()) => {
                    if let Some(entry) = self.controller.entries().last() {
                        writeln!(
                            self.out,
                            "Added {} {} at {}",
                            entry.first_name, entry.last_name, entry.address
                        )?;
                    }
                }
                Err(err) => writeln!(self.out, "Error: {}", err)?,
            },
            SessionCommand::Remove(id) => {
                let removed = self.controller.remove_entry(&id);
                writeln!(self.out, "Removed {} entr{}", removed, if removed == 1 { "y" } else { "ies" })?;
            }
            SessionCommand::Clear => {
                self.controller.clear_all();
                writeln!(self.out, "All fields cleared")?;
            }
            SessionCommand::Show => self.render_form()?,
            SessionCommand::Book => self.render_book()?,
            SessionCommand::Help => writeln!(self.out, "{}", HELP)?,
            SessionCommand::Quit => {}
        }
        Ok(())
    }

    fn start_search(&mut self) -> Result<()> {
        let ticket = self.controller.begin_search();
        writeln!(
            self.out,
            "Searching {} {}...",
            ticket.post_code, ticket.house_number
        )?;

        let lookup = self.controller.lookup();
        let tx = self.outcomes_tx.clone();
        self.in_flight += 1;
        let (post_code, house_number) = (ticket.post_code.clone(), ticket.house_number.clone());
        tokio::spawn(async move {
            // The lookup runs in its own task so a panic still reports back
            // and the ticket completes.
            let search = tokio::spawn(async move {
                lookup.find_addresses(&post_code, &house_number).await
            });
            let outcome = match search.await {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    tracing::error!(attempt = ticket.attempt, error = %join_error, "lookup task failed");
                    Err(AppError::LookupTask {
                        message: join_error.to_string(),
                    })
                }
            };
            // The receiver lives as long as the session.
            let _ = tx.send((ticket, outcome));
        });
        Ok(())
    }

    /// Wait for every spawned search to report back.
    pub async fn settle(&mut self) -> Result<()> {
        while self.in_flight > 0 {
            match self.outcomes_rx.recv().await {
                Some(outcome) => self.apply_outcome(outcome)?,
                None => break,
            }
        }
        Ok(())
    }

    fn apply_outcome(&mut self, (ticket, outcome): SearchOutcome) -> Result<()> {
        self.in_flight = self.in_flight.saturating_sub(1);
        if !self.controller.complete_search(&ticket, outcome) {
            return Ok(());
        }

        if let Some(error) = &self.controller.status().error {
            writeln!(self.out, "Error: {}", error)?;
            return Ok(());
        }

        self.render_results()
    }

    fn select(&mut self, choice: &str) -> Result<()> {
        let results = self.controller.results();
        let id = match choice.parse::<usize>() {
            Ok(n) if (1..=results.len()).contains(&n) => results[n - 1].id.clone(),
            _ => choice.to_string(),
        };

        let picked = results.iter().find(|address| address.id == id).cloned();
        self.controller.select_address(id);
        match picked {
            Some(address) => {
                writeln!(self.out, "Selected {}", address)?;
                writeln!(
                    self.out,
                    "Add personal info: set firstName <..>, set lastName <..>, then `add`"
                )?;
            }
            None => writeln!(self.out, "Selected an address that is not in the results")?,
        }
        Ok(())
    }

    fn render_results(&mut self) -> Result<()> {
        let results = self.controller.results();
        if results.is_empty() {
            writeln!(self.out, "No addresses found")?;
            return Ok(());
        }
        for (n, address) in results.iter().enumerate() {
            writeln!(self.out, "[{}] {} ({})", n + 1, address, address.id)?;
        }
        Ok(())
    }

    fn render_form(&mut self) -> Result<()> {
        for (name, value) in self.controller.fields().iter() {
            writeln!(self.out, "{}: {}", name, value)?;
        }
        let status = self.controller.status().clone();
        writeln!(self.out, "loading: {}", status.loading)?;
        if let Some(error) = status.error {
            writeln!(self.out, "error: {}", error)?;
        }
        self.render_results()
    }

    fn render_book(&mut self) -> Result<()> {
        let entries = self.controller.entries();
        if entries.is_empty() {
            writeln!(self.out, "Address book is empty")?;
            return Ok(());
        }
        for entry in entries {
            writeln!(
                self.out,
                "{} {}: {} ({})",
                entry.first_name, entry.last_name, entry.address, entry.address.id
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAddressBook;
    use crate::utils::error::FETCH_FAILED_MESSAGE;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::io::BufReader;

    struct PanickingLookup;

    #[async_trait]
    impl AddressLookup for PanickingLookup {
        async fn find_addresses(
            &self,
            _post_code: &str,
            _house_number: &str,
        ) -> Result<Vec<RawAddressRecord>> {
            panic!("lookup backend crashed");
        }
    }

    #[tokio::test]
    async fn test_panicking_lookup_still_completes_search() {
        let controller = FormController::new(PanickingLookup, InMemoryAddressBook::new());
        let mut session = Session::new(controller, Vec::new());

        tokio::time::timeout(
            Duration::from_secs(3),
            session.run(BufReader::new("set postCode 1345\nfind\nwait\n".as_bytes())),
        )
        .await
        .expect("session should not hang when a lookup panics")
        .unwrap();

        let status = session.controller().status();
        assert!(!status.loading);
        assert_eq!(status.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert!(session.controller().results().is_empty());

        let (_, out) = session.into_parts();
        assert!(String::from_utf8(out)
            .unwrap()
            .contains(&format!("Error: {}", FETCH_FAILED_MESSAGE)));
    }

    #[test]
    fn test_parse_set_keeps_spaces_in_value() {
        assert_eq!(
            parse_command("set lastName  van  Rossum ").unwrap(),
            Some(SessionCommand::Set {
                field: FieldName::LastName,
                value: "van  Rossum".to_string(),
            })
        );
        assert_eq!(
            parse_command("set firstName").unwrap(),
            Some(SessionCommand::Set {
                field: FieldName::FirstName,
                value: String::new(),
            })
        );
    }

    #[test]
    fn test_parse_rejects_unknown_input() {
        assert!(parse_command("set nickname Ada").is_err());
        assert!(parse_command("set").is_err());
        assert!(parse_command("select").is_err());
        assert!(parse_command("launch").is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(parse_command("find").unwrap(), Some(SessionCommand::Find));
        assert_eq!(
            parse_command("select 2").unwrap(),
            Some(SessionCommand::Select("2".to_string()))
        );
        assert_eq!(parse_command("exit").unwrap(), Some(SessionCommand::Quit));
    }
}
