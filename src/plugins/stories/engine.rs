use std::collections::HashMap;

use crate::error::FormatError;
use crate::plugins::stories::format::{format_duration, format_timestamp, title_case};
use crate::plugins::stories::models::{Author, AuthorId, Media, OutputMedia, OutputStory, Story, StoryId};

/// Which part of a story record failed to format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticField {
    Published,
    MediaDuration,
}

impl DiagnosticField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticField::Published => "published",
            DiagnosticField::MediaDuration => "media_duration",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDiagnostic {
    pub story_id: StoryId,
    pub field: DiagnosticField,
    pub error: FormatError,
}

#[derive(Debug, Default)]
pub struct StoryList {
    pub stories: Vec<OutputStory>,
    pub diagnostics: Vec<RecordDiagnostic>,
}

pub fn build_story_list(stories: &[Story], authors: &[Author], media: &[Media]) -> Vec<OutputStory> {
    assemble(stories, authors, media).stories
}

pub fn assemble(stories: &[Story], authors: &[Author], media: &[Media]) -> StoryList {
    // later duplicates win
    let authors_by_id: HashMap<AuthorId, &Author> = authors.iter().map(|a| (a.id, a)).collect();

    let mut media_by_story: HashMap<StoryId, Vec<&Media>> = HashMap::new();
    for m in media {
        media_by_story.entry(m.story_id).or_default().push(m);
    }

    let mut list = StoryList { stories: Vec::with_capacity(stories.len()), diagnostics: Vec::new() };
    for story in stories {
        let published = match format_timestamp(&story.date_published) {
            Ok(p) => Some(p),
            Err(error) => {
                list.diagnostics.push(RecordDiagnostic { story_id: story.id, field: DiagnosticField::Published, error });
                None
            }
        };

        let mut entries = Vec::new();
        for m in media_by_story.get(&story.id).map(Vec::as_slice).unwrap_or_default() {
            match output_media(m) {
                Ok(entry) => entries.push(entry),
                Err(error) => list.diagnostics.push(RecordDiagnostic {
                    story_id: story.id,
                    field: DiagnosticField::MediaDuration,
                    error,
                }),
            }
        }

        list.stories.push(OutputStory {
            title: title_case(&story.title),
            author: authors_by_id.get(&story.author_id).map(|a| title_case(&a.full_name)),
            published,
            media: (!entries.is_empty()).then_some(entries),
        });
    }
    list
}

fn output_media(media: &Media) -> Result<OutputMedia, FormatError> {
    let duration = match &media.duration_seconds {
        Some(raw) => Some(format_duration(raw.seconds()?)?),
        None => None,
    };
    Ok(OutputMedia {
        kind: media.kind.clone(),
        url: media.url.clone(),
        duration,
        credit: media.credit.clone(),
        caption: media.caption.clone(),
    })
}
