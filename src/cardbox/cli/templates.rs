//! # CLI Templates
//!
//! minijinja templates rendered through `outstanding`. Every line break is
//! written out explicitly so loops and conditionals never leak whitespace.
//! Layout (padding, truncation, image labels) is done in Rust before
//! rendering; templates only pick styles and decide which lines appear.

pub const LIST_TEMPLATE: &str = concat!(
    "{{ heading | style(\"heading\") }}\n\n",
    "{% if empty_message %}",
    "{{ empty_message }}\n",
    "{{ hint | style(\"hint\") }}\n",
    "{% else %}",
    "{% for card in cards %}",
    "{{ card.index | style(\"id\") }}{{ card.title | style(\"title\") }}",
    "{{ card.padding }}{{ card.badge | style(card.badge_style) }}\n",
    "{% if card.description %}",
    "{{ indent }}{{ card.description | style(\"description\") }}\n",
    "{% endif %}",
    "{% if card.image %}{{ indent }}",
    "{% if card.image_is_placeholder %}{{ \"image: No Image\" | style(\"placeholder\") }}",
    "{% else %}image: {{ card.image | style(\"image\") }}{% endif %}\n",
    "{% endif %}",
    "{% endfor %}",
    "{% endif %}",
);

pub const CARD_TEMPLATE: &str = concat!(
    "{{ card.index | style(\"id\") }}{{ card.title | style(\"title\") }}",
    "{{ card.padding }}{{ card.badge | style(card.badge_style) }}\n",
    "{{ rule }}\n",
    "{% if card.description %}",
    "{{ card.description | style(\"description\") }}\n",
    "{% endif %}",
    "{% if card.image %}",
    "{% if card.image_is_placeholder %}{{ \"image: No Image\" | style(\"placeholder\") }}",
    "{% else %}image: {{ card.image | style(\"image\") }}{% endif %}\n",
    "{% endif %}",
);

pub const MESSAGES_TEMPLATE: &str = concat!(
    "{% for message in messages %}",
    "{{ message.content | style(message.style) }}\n",
    "{% endfor %}",
);
