//! Built-in categories for service-desk customer feedback.
//!
//! The trigger lists are kept exactly as the feedback team maintains them,
//! including the hand-enumerated inflections and multi-word phrases; whether
//! those are normalized or matched as phrases is decided by the matcher
//! options, not here.

use crate::category::rule::CategoryRule;

const SPEED: (&str, &[&str]) = (
    "Нравится скорость отработки заявок",
    &["быстро", "оперативно", "скорость", "сразу", "в тот же день", "моментально"],
);

const EXECUTION_QUALITY: (&str, &[&str]) = (
    "Нравится качество выполнения заявки",
    &[
        "качественно",
        "отлично",
        "хорошо",
        "хорошо сделал",
        "хорошо сделали",
        "проблема решена",
        "все работает",
        "доволен работой",
        "качество",
    ],
);

const STAFF_QUALITY: (&str, &[&str]) = (
    "Нравится качество работы сотрудников",
    &[
        "вежливо",
        "спасибо",
        "благодарю",
        "профессионально",
        "вежливый персонал",
        "компетентные сотрудники",
        "помогли разобраться",
        "вежливые",
        "грамотные",
        "сотрудники молодцы",
        "хорошие сотрудники",
        "мастер",
        "мастера",
        "мастеру",
        "мастером",
        "мастеров",
        "мастерам",
        "мастерами",
        "мастерах",
        "специалист",
        "специалиста",
        "специалисту",
        "специалистом",
        "специалисте",
        "специалисты",
        "специалистов",
        "специалистам",
        "специалистами",
        "специалистах",
        "работник",
        "работника",
        "работнику",
        "работником",
        "работнике",
        "работники",
        "работников",
        "работникам",
        "работниками",
        "работниках",
        "сотрудник",
        "сотрудника",
        "сотруднику",
        "сотрудником",
        "сотруднике",
        "сотрудники",
        "сотрудников",
        "сотрудникам",
        "сотрудниками",
        "сотрудниках",
    ],
);

const REQUEST_FULFILLED: (&str, &[&str]) = (
    "Понравилось выполнение заявки",
    &[
        "выполнить",
        "сделать",
        "хорошо",
        "спасибо",
        "благодарю",
        "понравилось",
        "доволен",
        "отлично",
        "супер",
        "замечательно",
    ],
);

const ISSUE_RESOLVED: (&str, &[&str]) = (
    "Вопрос решен",
    &[
        "решить",
        "устранить",
        "помочь",
        "закрыт",
        "выполнена",
        "вопрос закрыт",
        "проблема устранена",
        "все решено",
        "решили вопрос",
        "помогли решить",
    ],
);

/// The built-in rules in column order.
pub fn builtin_rules() -> Vec<CategoryRule> {
    [SPEED, EXECUTION_QUALITY, STAFF_QUALITY, REQUEST_FULFILLED, ISSUE_RESOLVED]
        .into_iter()
        .map(|(name, triggers)| CategoryRule::new(name, triggers.iter().copied()))
        .collect()
}
