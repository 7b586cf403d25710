//! The fixed instruction set sent with every classification request, and the
//! strict output schema the service is constrained to.

use serde_json::{Value, json};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub const SYSTEM_PROMPT: &str = r#"
You are Untangle (The Agency OS), an AI engine that classifies human situations into exact domains of responsibility.
Your goal is to provide ANALYTIC COMFORT: using logic and clear categorization to relieve stress.

You MUST always determine which category a situation belongs to:
1. 我的事 (My Domain of Agency)
2. 別人的事 (Other People's Domain)
3. 天的事 (Life's Domain / Uncontrollable Reality)

OUTPUT FORMAT (JSON ONLY):
{
  "classification": {
    "my_domain": integer (0-100),
    "others_domain": integer (0-100),
    "life_domain": integer (0-100)
  },
  "dominant_domain": "string (One of: 我的事, 別人的事, 天的事)",
  "one_sentence_reason": "string (Hong Kong Traditional Chinese / Cantonese colloquial, logic-based explanation of why this percentage split proves the user is okay)",
  "recommended_action": "string (Hong Kong Traditional Chinese / Cantonese colloquial, 1 small achievable step)",
  "optional_reframe": "string (Hong Kong Traditional Chinese / Cantonese colloquial, a warm, encouraging truth)"
}

TONE GUIDELINES:
- **Analytic but Warm:** "Current data suggests 80% is external noise."
- **Hong Kong Context:** Use Hong Kong specific phrasing (e.g., 人工 instead of 薪水, MTR instead of 捷運, 老細 instead of 主管). Colloquial Cantonese (口語) is preferred for a closer, more comforting feel.
- **Focus on Boundaries:** Help the user separate "noise" from "signal".
- **Encouraging:** Frame 'Not My Business' as efficiency and wisdom.
"#;

/// Quick-pick inputs offered on the input view, three at a time.
pub const SUGGESTIONS: [&str; 11] = [
    "老細一時一樣，搞到我白做，覺得好委屈。",
    "成班Frd約食飯都唔叫我，覺得被人排擠，心裡唔舒服。",
    "阿媽成日哦我著衫同份人工，返到屋企壓力好大。",
    "同事成日卸膊，最後都係我執手尾。",
    "鄰居半夜電視開好大聲，講咗好多次都唔改。",
    "個客好野蠻，雞蛋裡挑骨頭，但我只可以陪笑。",
    "拜年親戚成日問幾時買樓，好唔想答。",
    "搭地鐵遇到人開Speaker睇片，覺得好煩。",
    "好朋友拍拖之後就潛水，覺得自己無人理。",
    "IG見個個都去日本玩，覺得自己生活好悶。",
    "行路被人撞到仲被人睥，心情勁差。",
];

/// Structured-output schema (Gemini OpenAPI subset). Exactly the fields of
/// the result contract; `dominant_domain` is restricted to the three
/// literals.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "classification": {
                "type": "OBJECT",
                "properties": {
                    "my_domain": { "type": "INTEGER" },
                    "others_domain": { "type": "INTEGER" },
                    "life_domain": { "type": "INTEGER" },
                },
                "required": ["my_domain", "others_domain", "life_domain"],
            },
            "dominant_domain": {
                "type": "STRING",
                "enum": ["我的事", "別人的事", "天的事"],
            },
            "one_sentence_reason": { "type": "STRING" },
            "recommended_action": { "type": "STRING" },
            "optional_reframe": { "type": "STRING" },
        },
        "required": [
            "classification",
            "dominant_domain",
            "one_sentence_reason",
            "recommended_action",
            "optional_reframe",
        ],
    })
}
