//! News command implementation.

use crate::commands::Context;
use crate::display::spinner;
use anyhow::Result;

/// Print recent articles for each tracked topic.
pub(crate) async fn show_news(ctx: &Context, sample: usize) -> Result<()> {
    let progress = spinner(ctx.quiet, "Fetching news...".to_string());
    let topics = ctx.lookups().news(sample).await;
    progress.finish_and_clear();

    for topic in &topics {
        println!("\n{}", topic.topic);
        println!("{}", "-".repeat(60));
        match &topic.articles {
            Ok(articles) if articles.is_empty() => println!("  No recent articles."),
            Ok(articles) => {
                for article in articles {
                    println!("  {} ({})", article.title, article.domain);
                    println!("    {}", article.url);
                }
            }
            Err(e) => println!("  Unavailable: {e}"),
        }
    }
    Ok(())
}
