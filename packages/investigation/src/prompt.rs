//! Prompt construction for public-record investigations.

use gemini_client::GenerateContentRequest;

/// Build the grounded generation request for a subject name.
///
/// Pure and deterministic: the same name always produces the same request,
/// with the name embedded verbatim and Google Search grounding enabled.
/// Callers guarantee the name is non-empty and trimmed.
pub fn build_request(subject_name: &str) -> GenerateContentRequest {
    let prompt = format!(
        "Compile a public-record profile for a person named \"{subject_name}\".\n\
         \n\
         Cover the following, using clearly labeled sections:\n\
         1. Professional background and career history\n\
         2. Public social media presence\n\
         3. Known public locations (city/region level)\n\
         4. Notable achievements, publications, or press mentions\n\
         \n\
         If multiple people share this name, describe the most prominent \
         ones separately and say that the name is ambiguous. Only report \
         publicly available information, and keep a professional tone."
    );

    GenerateContentRequest::new(prompt).with_google_search()
}
