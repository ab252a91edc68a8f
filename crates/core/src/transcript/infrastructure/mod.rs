pub mod json_transcript_source;
