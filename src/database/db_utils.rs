use super::{BannedWord, BroadcastChat, Filter, GroupSettings, GroupUser};
use crate::engine::countdown::Countdown;
use crate::engine::warnings::apply_delta;
use chrono::{DateTime, Utc};
use futures::stream::TryStreamExt;
use mongodb::{bson::doc, Database};

type DbResult<T> = Result<T, mongodb::error::Error>;

fn group_users(db: &Database) -> mongodb::Collection<GroupUser> {
    db.collection("GroupUsers")
}
fn chat_filters(db: &Database) -> mongodb::Collection<Filter> {
    db.collection("ChatFilters")
}
fn banned_words(db: &Database) -> mongodb::Collection<BannedWord> {
    db.collection("BannedWords")
}
fn group_settings(db: &Database) -> mongodb::Collection<GroupSettings> {
    db.collection("GroupSettings")
}
fn broadcast_chats(db: &Database) -> mongodb::Collection<BroadcastChat> {
    db.collection("BroadcastChats")
}

pub async fn get_warn_count(db: &Database, chat_id: i64, user_id: i64) -> DbResult<i64> {
    let coll = group_users(db);
    let found = coll
        .find_one(doc! {"chat_id": chat_id, "user_id": user_id}, None)
        .await?;
    Ok(found.map(|u| u.warnings).unwrap_or(0))
}

/// Read-modify-write of the warning count, clamped at zero and persisted.
/// Not atomic across concurrent callers; last writer wins, which is the
/// accepted semantics here.
pub async fn adjust_warnings(
    db: &Database,
    chat_id: i64,
    user_id: i64,
    delta: i64,
) -> DbResult<i64> {
    let coll = group_users(db);
    let current = get_warn_count(db, chat_id, user_id).await?;
    let new_count = apply_delta(current, delta);
    coll.update_one(
        doc! {"chat_id": chat_id, "user_id": user_id},
        doc! {"$set": {"warnings": new_count}},
        mongodb::options::UpdateOptions::builder()
            .upsert(true)
            .build(),
    )
    .await?;
    Ok(new_count)
}

pub async fn set_filter(db: &Database, fl: &Filter) -> DbResult<()> {
    let coll = chat_filters(db);
    coll.update_one(
        doc! {"chat_id": fl.chat_id, "keyword": &fl.keyword},
        doc! {"$set": {"kind": &fl.kind, "content": &fl.content}},
        mongodb::options::UpdateOptions::builder()
            .upsert(true)
            .build(),
    )
    .await?;
    Ok(())
}

/// Returns whether a filter was actually removed; false means not-found.
pub async fn rm_filter(db: &Database, chat_id: i64, keyword: &str) -> DbResult<bool> {
    let coll = chat_filters(db);
    let res = coll
        .delete_one(doc! {"chat_id": chat_id, "keyword": keyword}, None)
        .await?;
    Ok(res.deleted_count > 0)
}

/// All filters of a group. Retrieval order is not meaningful; callers that
/// match pick deterministically.
pub async fn get_filters(db: &Database, chat_id: i64) -> DbResult<Vec<Filter>> {
    let coll = chat_filters(db);
    let cursor = coll.find(doc! {"chat_id": chat_id}, None).await?;
    cursor.try_collect().await
}

pub async fn add_banned_word(db: &Database, bw: &BannedWord) -> DbResult<()> {
    let coll = banned_words(db);
    coll.update_one(
        doc! {"chat_id": bw.chat_id, "word": &bw.word},
        doc! {"$set": {"word": &bw.word}},
        mongodb::options::UpdateOptions::builder()
            .upsert(true)
            .build(),
    )
    .await?;
    Ok(())
}

pub async fn rm_banned_word(db: &Database, chat_id: i64, word: &str) -> DbResult<bool> {
    let coll = banned_words(db);
    let res = coll
        .delete_one(doc! {"chat_id": chat_id, "word": word}, None)
        .await?;
    Ok(res.deleted_count > 0)
}

pub async fn get_banned_words(db: &Database, chat_id: i64) -> DbResult<Vec<String>> {
    let coll = banned_words(db);
    let cursor = coll.find(doc! {"chat_id": chat_id}, None).await?;
    let words: Vec<BannedWord> = cursor.try_collect().await?;
    Ok(words.into_iter().map(|b| b.word).collect())
}

pub async fn set_countdown(db: &Database, chat_id: i64, c: &Countdown) -> DbResult<()> {
    let coll = group_settings(db);
    coll.update_one(
        doc! {"chat_id": chat_id},
        doc! {"$set": {
            "countdown_name": &c.name,
            "target_ts": c.target.timestamp(),
            "target_display": &c.display,
        }},
        mongodb::options::UpdateOptions::builder()
            .upsert(true)
            .build(),
    )
    .await?;
    Ok(())
}

pub async fn clear_countdown(db: &Database, chat_id: i64) -> DbResult<()> {
    let coll = group_settings(db);
    coll.update_one(
        doc! {"chat_id": chat_id},
        doc! {"$unset": {"countdown_name": "", "target_ts": "", "target_display": ""}},
        None,
    )
    .await?;
    Ok(())
}

pub async fn get_countdown(db: &Database, chat_id: i64) -> DbResult<Option<Countdown>> {
    let coll = group_settings(db);
    let settings = coll.find_one(doc! {"chat_id": chat_id}, None).await?;
    Ok(settings.and_then(|s| {
        let name = s.countdown_name?;
        let target = DateTime::<Utc>::from_timestamp(s.target_ts?, 0)?;
        Some(Countdown {
            name,
            target,
            display: s.target_display.unwrap_or_default(),
        })
    }))
}

/// Upserted opportunistically whenever a chat interacts with the bot; this
/// is what feeds the broadcast fan-out.
pub async fn upsert_broadcast_chat(db: &Database, c: &BroadcastChat) -> DbResult<()> {
    let coll = broadcast_chats(db);
    coll.update_one(
        doc! {"chat_id": c.chat_id},
        doc! {"$set": {
            "chat_kind": &c.chat_kind,
            "title": &c.title,
            "last_active": c.last_active,
        }},
        mongodb::options::UpdateOptions::builder()
            .upsert(true)
            .build(),
    )
    .await?;
    Ok(())
}

pub async fn get_broadcast_chats(db: &Database) -> DbResult<Vec<i64>> {
    let coll = broadcast_chats(db);
    let cursor = coll.find(None, None).await?;
    let chats: Vec<BroadcastChat> = cursor.try_collect().await?;
    Ok(chats.into_iter().map(|c| c.chat_id).collect())
}
