use crate::{
    app::{ProviderKind, ProviderOpts},
    interact, render,
};

use bookrec::{provider::Provider, Format, Recency};

use clap::Subcommand;
use eyre::{eyre, Context};
use log::{info, trace};

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Recommend a handful of books on the given topics
    ///
    /// When no topics are given, or the interact flag is set using `-i` or `--interact`, the
    /// topics and preferences are asked for in a form.
    Recommend {
        /// Free text topics, such as "AI, history, fiction"
        topics: Option<String>,

        /// How recent the books should be
        ///
        /// One of: any, last-10-years, last-3-years
        #[clap(short, long, default_value = "any")]
        recency: Recency,

        /// A preferred format, may be used more than once
        ///
        /// One of: ebook, print, audiobook
        #[clap(short = 'F', long = "format")]
        formats: Vec<Format>,
    },

    /// Search a single provider and list every result it returns
    #[clap(arg_required_else_help = true)]
    Search {
        /// The provider to search
        #[clap(arg_enum)]
        provider: ProviderKind,

        /// Free text query
        query: String,
    },
}

impl Commands {
    pub fn execute(self, opts: &ProviderOpts, interact: bool) -> eyre::Result<String> {
        match self {
            Commands::Recommend {
                topics,
                recency,
                formats,
            } => {
                let (topics, recency, formats) = if interact || topics.is_none() {
                    trace!("Asking for the recommendation preferences..");
                    let form = interact::recommendation_form(topics, recency, &formats)?;
                    (form.topics, form.recency, form.formats)
                } else {
                    (topics.unwrap_or_default(), recency, formats)
                };

                let recommender = opts.recommender();
                info!("Recommending books on '{topics}' using {recommender:?}");
                let candidates = recommender
                    .recommend(&topics, recency, &formats)
                    .wrap_err_with(|| eyre!("Cannot recommend books on '{topics}'"))?;

                Ok(render::render(&candidates))
            }
            Commands::Search { provider, query } => {
                let provider = opts.provider(provider);
                let candidates = provider
                    .search(&query, provider.default_limit())
                    .wrap_err_with(|| eyre!("Cannot search {} for '{query}'", provider.name()))?;

                Ok(render::render(&candidates))
            }
        }
    }
}
