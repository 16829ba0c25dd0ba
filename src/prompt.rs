use serde_json::{Value, json};

use crate::config::SongsConfig;
use crate::models::SongQuery;

pub fn song_prompt(query: &SongQuery, songs: &SongsConfig) -> String {
    format!(
        r#"List the top {count} most iconic all-time hit {catalog} songs starting with the letter "{letter}".
For each song, provide the song title, the movie name, and exactly {lines} lines of famous lyrics.
Return ONLY a JSON array. Each element must be an object with exactly these string fields:
  "title"  - the song title
  "movie"  - the film the song is from
  "lyrics" - exactly {lines} lines of lyrics joined with a newline
If no songs qualify, return an empty array []."#,
        count = songs.count,
        catalog = songs.catalog,
        letter = query,
        lines = songs.lyric_lines,
    )
}

/// Output shape hint sent with the request. The service may ignore it.
pub fn song_schema(songs: &SongsConfig) -> Value {
    let lyrics = format!("{} lines of the most iconic lyrics", songs.lyric_lines);
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING", "description": "Name of the song" },
                "movie": { "type": "STRING", "description": "Name of the movie" },
                "lyrics": { "type": "STRING", "description": lyrics }
            },
            "required": ["title", "movie", "lyrics"]
        }
    })
}
