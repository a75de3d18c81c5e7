use crate::models::GenerationRequest;

pub const SYSTEM_INSTRUCTION: &str =
    "You are an expert e-commerce copywriter creating persuasive product descriptions.";

/// Build the user prompt for one request. Pure string assembly: no I/O, and
/// identical input always yields an identical prompt. Optional fields left at
/// their empty defaults are omitted entirely rather than printed blank.
pub fn build_prompt(req: &GenerationRequest) -> String {
    let words = req.length.target_words();

    let mut lines = vec![
        "Create a compelling e-commerce product description:".to_string(),
        String::new(),
        format!("Product: {}", req.product_name),
    ];
    if !req.brand.is_empty() {
        lines.push(format!("Brand: {}", req.brand));
    }
    if !req.category.is_empty() {
        lines.push(format!("Category: {}", req.category));
    }
    if !req.features.is_empty() {
        lines.push(format!("Features: {}", req.features.join(", ")));
    }
    lines.push(format!("Target Audience: {}", req.target_audience));
    lines.push(format!("Tone: {}", req.tone));
    lines.push(format!("Length: ~{words} words"));

    lines.push(String::new());
    lines.push("Provide:".to_string());
    lines.push("1. Short description (100 chars for product listings)".to_string());
    lines.push(format!("2. Full description (HTML formatted, {words} words)"));
    lines.push("3. Bullet points highlighting key features/benefits".to_string());
    lines.push("4. SEO keywords".to_string());
    lines.push("5. Call-to-action".to_string());

    lines.push(String::new());
    lines.push("Return JSON:".to_string());
    lines.push(
        r#"{
    "shortDescription": "string",
    "fullDescription": "HTML string",
    "bulletPoints": ["string"],
    "seoKeywords": ["string"],
    "callToAction": "string"
}"#
        .to_string(),
    );

    lines.join("\n")
}
