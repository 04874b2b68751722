// src/services/chatbot.rs
//
// Local replies used when no completion credential is configured.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    EmailTopic,
    CalendarTopic,
    General,
}

const GREETING_KEYWORDS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "howdy",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
];

const EMAIL_KEYWORDS: &[&str] = &["email", "e-mail", "mail", "inbox"];

const CALENDAR_KEYWORDS: &[&str] = &[
    "calendar",
    "meeting",
    "schedule",
    "appointment",
    "event",
    "agenda",
];

/// Priority order matters: a message with both a greeting and a topic
/// keyword is a greeting.
pub fn detect_intent(msg: &str) -> Intent {
    let msg_lower = msg.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| msg_lower.contains(k));

    if mentions(GREETING_KEYWORDS) {
        Intent::Greeting
    } else if mentions(EMAIL_KEYWORDS) {
        Intent::EmailTopic
    } else if mentions(CALENDAR_KEYWORDS) {
        Intent::CalendarTopic
    } else {
        Intent::General
    }
}

pub fn generate_reply(intent: Intent, user_msg: &str) -> String {
    use Intent::*;

    match intent {
        Greeting => "Hey there! I'm Poke from The Interaction Company! 👋\n\n\
            I'm your AI assistant for email, calendar, web research and the tools you \
            already use like Notion and Linear.\n\n\
            What can I help you get done today? 🚀"
            .to_string(),

        EmailTopic => "Email is my thing! 📧\n\n\
            I can help you triage your inbox, summarize long threads, draft replies and \
            follow up on messages that slipped through the cracks.\n\n\
            I'll always show you a draft and wait for your go-ahead before anything gets \
            sent, forwarded or replied to. ✅"
            .to_string(),

        CalendarTopic => "Let's get your schedule sorted! 📅\n\n\
            I can find open slots, set up meetings, move appointments around and remind \
            you about what's coming up next.\n\n\
            Tell me who you want to meet and when works best, and I'll take it from there. ⏰"
            .to_string(),

        General => format!(
            "Hey! I'm Poke from The Interaction Company! 👋\n\n\
            I received your message: \"{user_msg}\"\n\n\
            I'm your AI assistant designed to help you with email, calendar, web research \
            and various integrations. I'm proactive, efficient and here to make your life easier!\n\n\
            Heads up: I'm running in demo mode right now with no live model connected, so \
            these are canned replies. Add an OPENAI_API_KEY to get real answers. 🛠️"
        ),
    }
}
