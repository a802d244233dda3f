//! Console front end
//!
//! Line commands for the `inventory` binary and a [`Presenter`] that draws
//! the product table as plain text.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use shared::{ProductFields, ProductRecord, ProductStats};

use crate::presenter::{Notice, NoticeLevel, Presenter};

pub const HELP: &str = "\
Commands:
  list                     show all loaded products
  reload                   fetch the list from the server
  search <term>            filter by name or description
  stats                    product count and total value
  edit <id>                target a product with the next submit
  cancel                   stop editing
  submit <name>;<price>;<quantity>[;<description>[;<image path>]]
                           add a product, or update the edited one
  delete <id>              delete a product (asks first)
  help                     this text
  quit                     exit";

/// Parsed `submit` arguments
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitArgs {
    pub fields: ProductFields,
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Reload,
    Search(String),
    Stats,
    Edit(i64),
    Cancel,
    Submit(SubmitArgs),
    Delete(i64),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "list" | "ls" => Ok(Command::List),
            "reload" => Ok(Command::Reload),
            "search" | "find" => Ok(Command::Search(rest.to_string())),
            "stats" => Ok(Command::Stats),
            "edit" => parse_id(rest).map(Command::Edit),
            "cancel" => Ok(Command::Cancel),
            "submit" | "add" | "save" => parse_submit(rest).map(Command::Submit),
            "delete" | "rm" => parse_id(rest).map(Command::Delete),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err("Empty command".to_string()),
            other => Err(format!("Unknown command '{}'. Type 'help'.", other)),
        }
    }
}

fn parse_id(arg: &str) -> Result<i64, String> {
    arg.parse()
        .map_err(|_| format!("Expected a product id, got '{}'", arg))
}

fn parse_submit(arg: &str) -> Result<SubmitArgs, String> {
    let parts: Vec<&str> = arg.split(';').map(str::trim).collect();
    if parts.len() < 3 {
        return Err("Usage: submit <name>;<price>;<quantity>[;<description>[;<image path>]]".into());
    }
    let price: f64 = parts[1]
        .parse()
        .map_err(|_| format!("Invalid price '{}'", parts[1]))?;
    let quantity: i64 = parts[2]
        .parse()
        .map_err(|_| format!("Invalid quantity '{}'", parts[2]))?;
    let description = parts.get(3).copied().unwrap_or_default();
    let image = parts
        .get(4)
        .filter(|path| !path.is_empty())
        .map(|path| PathBuf::from(*path));

    Ok(SubmitArgs {
        fields: ProductFields::new(parts[0], price, quantity).with_description(description),
        image,
    })
}

/// Text presenter over any reader/writer pair
pub struct ConsolePresenter<R, W> {
    input: R,
    output: W,
}

impl ConsolePresenter<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePresenter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Next input line, `None` on EOF
    pub fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read input");
                None
            }
        }
    }

    pub fn prompt(&mut self, text: &str) {
        self.write(format_args!("{}", text));
        if let Err(e) = self.output.flush() {
            tracing::error!(error = %e, "Failed to flush output");
        }
    }

    pub fn print(&mut self, text: &str) {
        self.write(format_args!("{}\n", text));
    }

    pub fn print_stats(&mut self, stats: &ProductStats) {
        self.write(format_args!(
            "Products: {}  Total value: {:.2}\n",
            stats.count, stats.total_value
        ));
    }

    fn write(&mut self, args: std::fmt::Arguments<'_>) {
        if let Err(e) = self.output.write_fmt(args) {
            tracing::error!(error = %e, "Failed to write output");
        }
    }
}

impl<R: BufRead, W: Write> Presenter for ConsolePresenter<R, W> {
    fn render(&mut self, rows: &[ProductRecord], stats: &ProductStats) {
        if rows.is_empty() {
            self.print("No products found.");
        } else {
            self.print(&format_table(rows));
        }
        self.print_stats(stats);
    }

    fn notify(&mut self, notice: Notice) {
        let tag = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Warning => "warn",
            NoticeLevel::Error => "error",
        };
        self.write(format_args!("[{}] {}\n", tag, notice.message));
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompt(&format!("{} [y/N] ", prompt));
        self.read_line()
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }
}

pub fn format_table(rows: &[ProductRecord]) -> String {
    let name_width = rows
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut out = format!(
        "{:>5}  {:<name_width$}  {:>12}  {:>8}  {:>14}  {}",
        "ID", "Name", "Price", "Qty", "Total", "Description"
    );
    for product in rows {
        let description = if product.description.is_empty() {
            "-"
        } else {
            product.description.as_str()
        };
        let image = if product.has_image() { " [img]" } else { "" };
        out.push_str(&format!(
            "\n{:>5}  {:<name_width$}  {:>12.2}  {:>8}  {:>14.2}  {}{}",
            product.id,
            product.name,
            product.price,
            product.quantity,
            product.total(),
            description,
            image
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("list"), Ok(Command::List));
        assert_eq!(Command::parse("  RELOAD "), Ok(Command::Reload));
        assert_eq!(Command::parse("edit 5"), Ok(Command::Edit(5)));
        assert_eq!(Command::parse("rm 12"), Ok(Command::Delete(12)));
        assert_eq!(Command::parse("search blue ink"), Ok(Command::Search("blue ink".into())));
        assert_eq!(Command::parse("search"), Ok(Command::Search(String::new())));
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert!(Command::parse("edit five").is_err());
        assert!(Command::parse("frobnicate").is_err());
        assert!(Command::parse("").is_err());
    }

    #[test]
    fn test_parse_submit() {
        let Ok(Command::Submit(args)) = Command::parse("submit Pen;1000;3") else {
            panic!("expected submit");
        };
        assert_eq!(args.fields, ProductFields::new("Pen", 1000.0, 3));
        assert_eq!(args.image, None);

        let Ok(Command::Submit(args)) =
            Command::parse("add Blue Pen ; 12.5 ; 4 ; fine tip ; ./img/pen.png")
        else {
            panic!("expected submit");
        };
        assert_eq!(args.fields.name, "Blue Pen");
        assert_eq!(args.fields.price, 12.5);
        assert_eq!(args.fields.description, "fine tip");
        assert_eq!(args.image, Some(PathBuf::from("./img/pen.png")));

        assert!(Command::parse("submit Pen;abc;3").is_err());
        assert!(Command::parse("submit Pen;1").is_err());
    }

    #[test]
    fn test_render_table_and_stats() {
        let rows = vec![ProductRecord {
            id: 1,
            name: "Pen".into(),
            price: 1000.0,
            quantity: 3,
            description: String::new(),
            image: Some("pen.png".into()),
        }];
        let mut presenter = ConsolePresenter::new(Cursor::new(Vec::new()), Vec::new());
        presenter.render(&rows, &ProductStats::from_records(&rows));

        let text = String::from_utf8(presenter.output().clone()).unwrap();
        assert!(text.contains("Pen"));
        assert!(text.contains("3000.00"));
        assert!(text.contains("[img]"));
        assert!(text.contains("Products: 1  Total value: 3000.00"));
    }

    #[test]
    fn test_render_empty() {
        let mut presenter = ConsolePresenter::new(Cursor::new(Vec::new()), Vec::new());
        presenter.render(&[], &ProductStats::default());
        let text = String::from_utf8(presenter.output().clone()).unwrap();
        assert!(text.starts_with("No products found."));
    }

    #[test]
    fn test_confirm_reads_answer() {
        let mut presenter = ConsolePresenter::new(Cursor::new(b"y\nno\n".to_vec()), Vec::new());
        assert!(presenter.confirm("Delete?"));
        assert!(!presenter.confirm("Delete?"));
        // EOF counts as no
        assert!(!presenter.confirm("Delete?"));
    }

    /// Accepts writes, fails every flush
    struct UnflushableWriter(Vec<u8>);

    impl Write for UnflushableWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_prompt_survives_flush_failure() {
        let mut presenter =
            ConsolePresenter::new(Cursor::new(Vec::new()), UnflushableWriter(Vec::new()));
        presenter.prompt("> ");
        presenter.print("still here");
        assert_eq!(presenter.output().0, b"> still here\n");
    }

    #[test]
    fn test_notice_tags() {
        let mut presenter = ConsolePresenter::new(Cursor::new(Vec::new()), Vec::new());
        presenter.notify(Notice::error("boom"));
        let text = String::from_utf8(presenter.output().clone()).unwrap();
        assert_eq!(text, "[error] boom\n");
    }
}
