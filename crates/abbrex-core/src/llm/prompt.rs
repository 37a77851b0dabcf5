/// Prompt sent to the model: document context first, then the question.
///
/// The context may be empty when no document was uploaded.
#[must_use]
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "\nContext from document (may be empty):\n{context}\n\nQuestion:\n{question}\n\n\
         Answer clearly and use the document context when it is relevant.\n"
    )
}
