use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "courtbot")]
#[command(about = "Squash court lookup and booking for the Zesiger center")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report court availability (add "tomorrow" to look a day ahead)
    Look {
        /// Free-form request text, e.g. "tomorrow"
        text: Vec<String>,
    },

    /// Book a court, e.g. "#4 @ 8 pm" (add "tomorrow" to book a day ahead)
    Book {
        /// Free-form request text with a court number and an hour
        text: Vec<String>,
    },

    /// Answer a free-form chat message by its first trigger word
    /// (help / show / book)
    Chat {
        /// Message text, e.g. "show me the courts tomorrow"
        text: Vec<String>,
    },

    /// Run one scheduled booking cycle over the configured target hours
    Auto,

    /// Serve the Slack slash-command endpoints
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_look_with_free_text() {
        let cli = Cli::parse_from(["courtbot", "look", "tomorrow", "please"]);
        match cli.command {
            Commands::Look { text } => assert_eq!(text, ["tomorrow", "please"]),
            _ => panic!("expected look"),
        }
    }

    #[test]
    fn test_parses_book_request() {
        let cli = Cli::parse_from(["courtbot", "book", "#4", "@", "8", "pm"]);
        match cli.command {
            Commands::Book { text } => assert_eq!(text.join(" "), "#4 @ 8 pm"),
            _ => panic!("expected book"),
        }
    }

    #[test]
    fn test_parses_chat_message() {
        let cli = Cli::parse_from(["courtbot", "chat", "reserve", "#2", "at", "8pm"]);
        match cli.command {
            Commands::Chat { text } => assert_eq!(text.join(" "), "reserve #2 at 8pm"),
            _ => panic!("expected chat"),
        }
    }

    #[test]
    fn test_serve_port_defaults_to_3000() {
        let cli = Cli::parse_from(["courtbot", "serve"]);
        match cli.command {
            Commands::Serve { port } => assert_eq!(port, 3000),
            _ => panic!("expected serve"),
        }
    }
}
