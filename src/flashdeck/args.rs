use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "flashdeck")]
#[command(about = "Study cards by category, with favorites and admin editing", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, env = "FLASHDECK_HOME")]
    pub home: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in with a username and password, or through a provider
    Login {
        /// Username
        #[arg(required_unless_present = "provider")]
        user: Option<String>,

        /// Password
        #[arg(required_unless_present = "provider")]
        password: Option<String>,

        /// Provider name (e.g. google, facebook); no verification takes place
        #[arg(long, conflicts_with_all = ["user", "password"])]
        provider: Option<String>,
    },

    /// Create an account and log in
    #[command(alias = "register")]
    Signup {
        user: String,
        email: String,
        password: String,
    },

    /// End the current session
    Logout,

    /// Show the current session
    Whoami,

    /// List categories with card counts
    #[command(alias = "cats")]
    Categories,

    /// List the cards of a category ("Favoriler"/"Favorites" for favorites)
    #[command(alias = "ls")]
    Cards {
        /// Category label; lists every card when omitted
        category: Option<String>,
    },

    /// Show a single card
    Show { id: String },

    /// Add a card (admin only)
    #[command(alias = "new")]
    Add {
        #[arg(short, long)]
        category: String,

        #[arg(short, long)]
        text: String,

        #[arg(long)]
        image_url: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },

    /// Edit a card; omitted fields keep their value (admin only)
    Edit {
        id: String,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        text: Option<String>,

        #[arg(long)]
        image_url: Option<String>,

        /// Remove the image
        #[arg(long, conflicts_with = "image_url")]
        clear_image: bool,

        #[arg(long)]
        color: Option<String>,

        /// Remove the background colour
        #[arg(long, conflicts_with = "color")]
        clear_color: bool,
    },

    /// Delete a card (admin only)
    #[command(alias = "rm")]
    Delete { id: String },

    /// Toggle a card in or out of favorites
    Fav { id: String },

    /// Show or toggle the colour theme
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_password_login() {
        let cli = Cli::try_parse_from(["flashdeck", "login", "admin", "admin123"]).unwrap();
        match cli.command {
            Some(Commands::Login {
                user,
                password,
                provider,
            }) => {
                assert_eq!(user.as_deref(), Some("admin"));
                assert_eq!(password.as_deref(), Some("admin123"));
                assert!(provider.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn provider_login_needs_no_credentials() {
        let cli = Cli::try_parse_from(["flashdeck", "login", "--provider", "google"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Login { provider: Some(ref p), .. }) if p == "google"
        ));
    }

    #[test]
    fn login_without_anything_is_rejected() {
        assert!(Cli::try_parse_from(["flashdeck", "login"]).is_err());
    }

    #[test]
    fn edit_can_clear_optional_fields() {
        let cli = Cli::try_parse_from(["flashdeck", "edit", "7", "--clear-image", "--clear-color"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Edit {
                image_url: None,
                clear_image: true,
                color: None,
                clear_color: true,
                ..
            })
        ));
    }

    #[test]
    fn edit_cannot_set_and_clear_the_same_field() {
        let parsed = Cli::try_parse_from([
            "flashdeck",
            "edit",
            "7",
            "--image-url",
            "https://img.test/a.png",
            "--clear-image",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn home_flag_is_global() {
        let cli = Cli::try_parse_from(["flashdeck", "cards", "--home", "/tmp/deck"]).unwrap();
        assert_eq!(cli.home, Some(PathBuf::from("/tmp/deck")));
    }
}
