//! Static copy and outbound links for the landing page.

/// External profile links.
#[derive(Debug, Clone)]
pub struct Links {
    pub apple: &'static str,
    pub spotify: &'static str,
    pub youtube: &'static str,
    pub tiktok: &'static str,
    pub patreon: &'static str,
    pub instagram: &'static str,
    pub x: &'static str,
}

/// A headline number in the hero.
#[derive(Debug, Clone)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

/// Mailing-list signup form posting to Mailchimp.
#[derive(Debug, Clone)]
pub struct SignupForm {
    /// Form `action` URL.
    pub action: &'static str,
    /// Name of the hidden honeypot field Mailchimp requires.
    pub honeypot_field: &'static str,
}

/// Everything on the page that is not the shop grid.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub links: Links,
    pub contact_email: &'static str,
    pub hero_lines: Vec<&'static str>,
    pub tagline: &'static str,
    pub artwork_url: &'static str,
    /// Spotify show embedded as the latest-episode player.
    pub spotify_show_id: &'static str,
    pub stats: Vec<Stat>,
    pub hosts_intro: &'static str,
    pub hosts_highlights: Vec<&'static str>,
    pub signup: SignupForm,
    pub publisher: &'static str,
    /// First year of the show, used in the footer.
    pub founded: i32,
}

impl PageContent {
    /// Player URL for the embedded Spotify show.
    #[must_use]
    pub fn spotify_embed_url(&self) -> String {
        format!(
            "https://open.spotify.com/embed/show/{}?utm_source=generator&theme=0",
            self.spotify_show_id
        )
    }

    /// `mailto:` link for the contact address.
    #[must_use]
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.contact_email)
    }
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            links: Links {
                apple: "https://podcasts.apple.com/us/podcast/crime-salad/id1457141569",
                spotify: "https://open.spotify.com/show/3i7DxU0YyDnaMVdDrF4fpG",
                youtube: "https://www.youtube.com/crimesalad",
                tiktok: "https://www.tiktok.com/@crimesaladpodcast",
                patreon: "https://www.patreon.com/c/Crimesaladpodcast",
                instagram: "https://www.instagram.com/crimesaladpodcast",
                x: "https://x.com/crimesalad",
            },
            contact_email: "crimesaladpodcast@gmail.com",
            hero_lines: vec!["Bite sized.", "True Crime.", "Weekly."],
            tagline: "Real cases told with empathy and rigor, hosted by Ashley and Ricky.",
            artwork_url: "https://images.squarespace-cdn.com/content/68a0d886c9764f26cf67e325/a7ccc554-e902-4c51-8f87-a058f1e1d6f8/Crime-Salad-Art.png?content-type=image%2Fpng",
            spotify_show_id: "3i7DxU0YyDnaMVdDrF4fpG",
            stats: vec![
                Stat {
                    value: "300+",
                    label: "Victim Focused Episodes",
                },
                Stat {
                    value: "Top 0.1%",
                    label: "of Podcasts",
                },
                Stat {
                    value: "Weekly",
                    label: "New Episodes",
                },
                Stat {
                    value: "Since 2019",
                    label: "Trusted Stories",
                },
            ],
            hosts_intro: "Ashley leads the storytelling; Ricky brings context and candid reactions. \
                          Together we break down complex cases with empathy and clarity, \
                          always prioritizing the truth.",
            hosts_highlights: vec![
                "Weekly episodes & bonus deep dives",
                "Spotlight on victim advocacy and reforms",
                "Listener community with Q&As and case polls",
            ],
            signup: SignupForm {
                action: "https://crimesaladpodcast.us1.list-manage.com/subscribe/post?u=cc67224c1a30078239b64e0d3&id=466ab65f6a&f_id=00c2c3e1f0",
                honeypot_field: "b_cc67224c1a30078239b64e0d3_466ab65f6a",
            },
            publisher: "Weird Salad Media",
            founded: 2019,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spotify_embed_url() {
        let content = PageContent::default();
        assert_eq!(
            content.spotify_embed_url(),
            "https://open.spotify.com/embed/show/3i7DxU0YyDnaMVdDrF4fpG?utm_source=generator&theme=0"
        );
    }

    #[test]
    fn test_mailto() {
        assert_eq!(
            PageContent::default().mailto(),
            "mailto:crimesaladpodcast@gmail.com"
        );
    }
}
