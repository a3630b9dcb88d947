use std::sync::Arc;

use futures::future::try_join;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, warn};

use crate::app::{AppContext, ReaderError, Result};
use crate::domain::{ArticleRef, FeedQuery, FeedTag, Post};
use crate::navigation::{spawn_trigger_listener, ChannelNavigator, TriggerHandle, TriggerSource};
use crate::notifications::{NotificationBridge, NotificationPayload};

/// How many other posts to list under an article.
const RECENT_COUNT: usize = 5;

pub async fn show_feed(
    ctx: &AppContext,
    tag: Option<String>,
    limit: u32,
    page: Option<u32>,
) -> Result<()> {
    let mut query = FeedQuery::new().with_limit(limit).with_optional_tag(tag);
    if let Some(page) = page {
        query = query.with_page(page);
    }

    let feed = ctx.content.list_posts(&query).await?;

    let heading = match query.tag() {
        Some(slug) => FeedTag::label_for(Some(slug)).unwrap_or(slug),
        None => FeedTag::label_for(None).unwrap_or_default(),
    };
    println!("{}", heading);

    if feed.is_empty() {
        println!("No articles found.");
        return Ok(());
    }

    for post in &feed.posts {
        print_summary(post);
    }

    if let Some(pagination) = &feed.pagination {
        println!("Page {} of {} ({} articles)", pagination.page, pagination.pages, pagination.total);
    }

    Ok(())
}

pub async fn read_article(ctx: &AppContext, slug: &str, browser: bool) -> Result<()> {
    let (post, recent) = try_join(
        ctx.content.get_post(slug),
        ctx.content.recent_posts(slug, RECENT_COUNT),
    )
    .await?;

    if browser {
        open::that(&post.url)?;
        println!("Opened {}", post.url);
        return Ok(());
    }

    print_article(&post);

    if !recent.is_empty() {
        println!();
        println!("More articles:");
        for post in &recent {
            print_summary(post);
        }
    }

    Ok(())
}

pub fn resolve_link(ctx: &AppContext, url: &str) {
    match ctx.resolver.resolve(url) {
        Some(article) => println!("{}", article),
        None => println!("Not an article link"),
    }
}

pub async fn open_link(ctx: &AppContext, url: &str) -> Result<()> {
    let (navigator, mut articles) = ChannelNavigator::new();
    let dispatcher = ctx.dispatcher(Arc::new(navigator));

    if !dispatcher.handle_url(TriggerSource::InitialUrl, url) {
        println!("Not an article link: {}", url);
        return Ok(());
    }

    match articles.try_recv() {
        Ok(article) => read_article(ctx, article.slug(), false).await,
        Err(_) => Ok(()),
    }
}

/// Each stdin line is either a link or a JSON notification payload.
pub async fn listen(ctx: &AppContext, initial_url: Option<String>) -> Result<()> {
    let (navigator, mut articles) = ChannelNavigator::new();
    let dispatcher = ctx.dispatcher(Arc::new(navigator));
    let bridge = Arc::new(NotificationBridge::new(dispatcher.clone()));
    let (handle, listener) = spawn_trigger_listener(dispatcher, bridge, initial_url);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(article) = articles.recv() => show_inline(ctx, &article).await,
            line = lines.next_line() => match line? {
                Some(line) => route_line(&handle, line.trim()).await,
                None => break,
            },
        }
    }

    handle.shutdown().await;
    if let Err(e) = listener.await {
        error!("Task join error: {}", e);
    }

    while let Ok(article) = articles.try_recv() {
        show_inline(ctx, &article).await;
    }

    Ok(())
}

pub fn list_tags() {
    for tag in FeedTag::ALL {
        println!("{:<12} {}", tag.slug(), tag.label());
    }
}

pub fn status(ctx: &AppContext) {
    let client = ctx.content.config();

    if ctx.content.is_configured() {
        println!("Content API: configured ({}, {})", client.base_url, client.api_version);
    } else {
        println!("Content API: not configured");
    }

    println!("Site links:  {}", if client.base_url.is_empty() { "-" } else { client.base_url.as_str() });
    println!(
        "Push tokens: {}",
        if ctx.config.push.is_configured() { "configured" } else { "not configured" }
    );
}

pub async fn register_push_token(ctx: &AppContext, token: &str) -> Result<()> {
    let store = ctx
        .token_store()?
        .ok_or_else(|| ReaderError::Config("Push token storage is not configured".into()))?;
    store.register(token).await?;
    println!("Registered push token");
    Ok(())
}

pub async fn unregister_push_token(ctx: &AppContext, token: &str) -> Result<()> {
    let store = ctx
        .token_store()?
        .ok_or_else(|| ReaderError::Config("Push token storage is not configured".into()))?;
    store.unregister(token).await?;
    println!("Unregistered push token");
    Ok(())
}

/// Anything that isn't a JSON object is treated as an empty payload.
pub async fn tap_notification(ctx: &AppContext, payload: &str) -> Result<()> {
    let payload: NotificationPayload = serde_json::from_str(payload).unwrap_or_default();

    let (navigator, mut articles) = ChannelNavigator::new();
    let bridge = NotificationBridge::new(ctx.dispatcher(Arc::new(navigator)));

    if !bridge.handle_tap(&payload) {
        println!("Notification does not point at an article");
        return Ok(());
    }

    match articles.try_recv() {
        Ok(article) => read_article(ctx, article.slug(), false).await,
        Err(_) => Ok(()),
    }
}

async fn route_line(handle: &TriggerHandle, line: &str) {
    if line.is_empty() {
        return;
    }

    if line.starts_with('{') {
        match serde_json::from_str::<NotificationPayload>(line) {
            Ok(payload) => handle.notification_tap(payload).await,
            Err(e) => warn!("Ignoring malformed notification payload: {}", e),
        }
    } else {
        handle.url_event(line).await;
    }
}

async fn show_inline(ctx: &AppContext, article: &ArticleRef) {
    match ctx.content.get_article(article).await {
        Ok(post) => print_article(&post),
        Err(e) => eprintln!("{}: {}", article, e),
    }
}

fn print_summary(post: &Post) {
    let tag = post
        .primary_tag
        .as_ref()
        .map(|t| t.name.as_str())
        .unwrap_or("");
    println!(
        "{:<18} {:<12} {}  [{}]",
        post.display_date(),
        tag,
        post.display_title(),
        post.slug
    );
}

fn print_article(post: &Post) {
    println!("{}", post.display_title());
    println!("{}", post.display_date());
    if let Some(image) = &post.feature_image {
        println!("{}", image);
    }
    println!();
    println!("{}", post.display_body());
    println!();
    println!("{}", post.canonical_url.as_deref().unwrap_or(&post.url));
}
