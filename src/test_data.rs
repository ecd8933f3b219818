#[cfg(test)]
pub const CONVERTED_POST: &str = r#"---
title: "Hi \"there\""
date: 2023-11-14
lastmod: 2023-11-14
summary: "A test"
---
Hello
World
"#;

#[cfg(test)]
pub const CONVERTED_DRAFT: &str = "---
title: \"Work in progress\"
draft: true
lastmod: 2011-03-02
summary: \"Not yet\"
---
Nothing to see here
";
