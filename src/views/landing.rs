//! Landing page. Static content, no network.

use chrono::{Datelike, Local};
use serde::Serialize;
use std::fmt;

use super::format::heading;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LandingScreen {
    pub title: &'static str,
    pub tagline: &'static str,
    pub actions: Vec<Link>,
    pub about: &'static str,
    pub address: &'static str,
    pub support_email: &'static str,
    pub social: Vec<Link>,
    pub year: i32,
}

#[derive(Debug, Default)]
pub struct LandingView;

impl LandingView {
    pub fn new() -> Self {
        Self
    }

    pub fn screen(&self) -> LandingScreen {
        self.screen_for_year(Local::now().year())
    }

    pub fn screen_for_year(&self, year: i32) -> LandingScreen {
        LandingScreen {
            title: "Welcome to the Auction App",
            tagline: "The best place to buy and sell items through auctions.",
            actions: vec![
                Link { label: "Sign In", href: "/signin" },
                Link { label: "Sign Up", href: "/signup" },
            ],
            about: "The Auction App is a platform where you can buy and sell unique items \
                    through a seamless auction process. Whether you're looking for rare \
                    collectibles, electronics, or art, our app connects you with sellers \
                    worldwide. Join us today and experience the thrill of bidding!",
            address: "123 Auction Street, Bid City, BC 12345",
            support_email: "support@auctionapp.com",
            social: vec![
                Link { label: "Facebook", href: "https://facebook.com" },
                Link { label: "Twitter", href: "https://twitter.com" },
                Link { label: "Instagram", href: "https://instagram.com" },
            ],
            year,
        }
    }
}

impl fmt::Display for LandingScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, self.title, '=')?;
        writeln!(f, "{}", self.tagline)?;
        writeln!(f)?;

        for action in &self.actions {
            writeln!(f, "[{}] {}", action.label, action.href)?;
        }
        writeln!(f)?;

        heading(f, "About Us", '-')?;
        writeln!(f, "{}", self.about)?;
        writeln!(f)?;

        heading(f, "Contact Us", '-')?;
        writeln!(f, "{}", self.address)?;
        writeln!(f, "{}", self.support_email)?;
        let social: Vec<_> = self.social.iter().map(|l| l.href).collect();
        writeln!(f, "{}", social.join("  "))?;
        writeln!(f)?;

        writeln!(f, "\u{a9} {} Auction App. All rights reserved.", self.year)
    }
}
