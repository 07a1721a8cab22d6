//! Development sample data

use sqlx::SqlitePool;
use tracing::info;

use crate::models::{GenerationParams, InstrumentalParams, VocalParams};
use crate::service::{create_output, create_prompt};
use crate::validation::{CreateOutputRequest, CreatePromptRequest};
use crate::Result;

const SAMPLE_LYRICS: &str = "[Verse 1]
Wandering beneath the night sky
Searching for the light I lost

[Chorus]
Starlight shining, lighting up the way
Walking on bravely, no longer astray";

/// Load sample prompts and outputs into an empty database
///
/// Returns the number of prompts inserted; zero when prompts already exist.
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<usize> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM prompts")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        info!(existing, "Prompts already present, skipping sample data");
        return Ok(0);
    }

    let complete = create_prompt(
        pool,
        CreatePromptRequest {
            lyrics: Some(SAMPLE_LYRICS.to_string()),
            style: Some("Pop, Acoustic, Emotional, 80-100 BPM".to_string()),
            vocal: Some(VocalParams {
                gender: Some("female".to_string()),
                timbre: Some("clear, warm".to_string()),
                style: Some("lyrical".to_string()),
                ..Default::default()
            }),
            instrumental: Some(InstrumentalParams {
                instruments: Some(vec![
                    "acoustic guitar".to_string(),
                    "piano".to_string(),
                    "light percussion".to_string(),
                ]),
                bpm: Some(90.0),
                ..Default::default()
            }),
        },
    )
    .await?;

    create_prompt(
        pool,
        CreatePromptRequest {
            lyrics: Some("Simple lyrics without any section tags".to_string()),
            style: Some("Rock, Electric Guitar".to_string()),
            ..Default::default()
        },
    )
    .await?;

    create_prompt(
        pool,
        CreatePromptRequest {
            lyrics: Some("Just a few plain lyric lines".to_string()),
            ..Default::default()
        },
    )
    .await?;

    for (url, seed, temperature) in [
        ("https://example.com/audio/sample1.mp3", 12345, 0.8),
        ("https://example.com/audio/sample2.mp3", 54321, 0.9),
    ] {
        create_output(
            pool,
            complete.id,
            CreateOutputRequest {
                audio_url: url.to_string(),
                model_version: None,
                generation_params: Some(GenerationParams {
                    seed: Some(seed),
                    temperature: Some(temperature),
                    ..Default::default()
                }),
            },
        )
        .await?;
    }

    info!("Loaded sample data: 3 prompts, 2 outputs");
    Ok(3)
}
