use anyhow::Result;
use colored::Colorize;

use nactive_auth::policy::{self, Action};
use nactive_auth::session::SessionStore;
use nactive_client::AuthGateway;

use crate::cli::LoginArgs;
use crate::output::{print_error, print_success, role_badge};

pub async fn login(gateway: &AuthGateway, args: &LoginArgs) -> Result<()> {
    let identity = gateway.login(&args.username, &args.password).await?;
    print_success(&format!(
        "Logged in as {} ({})",
        identity.username.cyan(),
        role_badge(identity.role)
    ));
    Ok(())
}

pub async fn logout(gateway: &AuthGateway) -> Result<()> {
    gateway.logout().await?;
    print_success("Logged out");
    Ok(())
}

/// Session introspection: who is logged in, and which actions the policy
/// grants that role. The action list is the CLI's rendering of the role-gated
/// navigation.
pub fn whoami(session: &SessionStore, profile: &str) -> Result<()> {
    match session.current() {
        Some(identity) => {
            println!("{}: {}", "Profile".cyan(), profile);
            println!("{}: {}", "User".cyan(), identity.username);
            println!("{}: {}", "Role".cyan(), role_badge(identity.role));
            println!("{}:", "Allowed actions".cyan());
            for action in Action::ALL {
                if policy::is_allowed(identity.role, action) {
                    println!("  - {action}");
                }
            }
        }
        None => {
            print_error(&format!("Not logged in (profile: \"{profile}\")"));
        }
    }
    Ok(())
}
