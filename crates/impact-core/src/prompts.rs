//! Prompt templates sent to the completion API.
//!
//! Every template is a deterministic function of avatar/domain fields, so the
//! same persona always yields the same instruction text.

use crate::registry::{self, Avatar};

/// System instruction that puts the model in character for one avatar.
pub fn system_prompt(
    name: &str,
    domain_name: &str,
    personality: &str,
    description: &str,
    expertise: &[String],
) -> String {
    format!(
        "You are {name}, an AI avatar specializing in {domain_name}. \n\n\
Your personality: {personality}\n\
Your role: {description}\n\
Your expertise: {expertise}\n\n\
Guidelines:\n\
- Always stay in character as {name}\n\
- Focus on providing helpful, accurate information in your domain\n\
- Be {personality} in all interactions\n\
- Provide practical, actionable advice when possible\n\
- If asked about topics outside your expertise, politely redirect to the appropriate domain\n\
- Keep responses conversational and engaging\n\
- Show empathy and understanding for the user's situation\n\
- End responses with encouraging or thought-provoking questions when appropriate\n\n\
Remember, you're part of a social impact platform designed to help people improve their lives and make positive changes in the world.",
        name = name,
        domain_name = domain_name,
        personality = personality,
        description = description,
        expertise = expertise.join(", "),
    )
}

/// System prompt for a catalog avatar.
pub fn system_prompt_for(avatar: &Avatar) -> String {
    let expertise: Vec<String> = avatar.expertise.iter().map(|e| e.to_string()).collect();
    system_prompt(
        avatar.name,
        registry::domain(avatar.domain).name,
        avatar.personality,
        avatar.description,
        &expertise,
    )
}

/// Prompt asking for 3 follow-up suggestions after a completed exchange.
/// The model is instructed to answer with a JSON array of strings.
pub fn suggestion_prompt(
    avatar_name: &str,
    domain_name: &str,
    expertise: &[String],
    user_message: &str,
    reply: &str,
) -> String {
    format!(
        "Based on this conversation about {domain} between a user and {name}:\n\n\
User: \"{user}\"\n\
{name}: \"{reply}\"\n\n\
Generate 3 short, relevant follow-up questions or topics the user might want to explore next. \
Focus on {domain} and the expertise areas: {expertise}.\n\n\
Return only a JSON array of strings, no other text.",
        domain = domain_name,
        name = avatar_name,
        user = user_message,
        reply = reply,
        expertise = expertise.join(", "),
    )
}

/// Prompt asking for 5 conversation starters for a domain specialist.
pub fn starters_prompt(domain_name: &str, expertise: &[String]) -> String {
    format!(
        "Generate 5 engaging conversation starters for someone talking to an AI assistant \
specializing in {domain}. The assistant's expertise includes: {expertise}.\n\n\
Make the starters:\n\
- Practical and actionable\n\
- Relevant to real user needs\n\
- Encouraging and positive\n\
- Varied in scope (beginner to advanced topics)\n\n\
Return as a JSON object with a \"starters\" array containing the conversation starters as strings.",
        domain = domain_name,
        expertise = expertise.join(", "),
    )
}
