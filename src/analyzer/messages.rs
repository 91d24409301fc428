//! Canned analyzer text in every supported display language.

use crate::models::Locale;

pub fn concept_understood(locale: Locale, concept: &str) -> String {
    match locale {
        Locale::En => format!("Correctly understood the concept \"{concept}\""),
        Locale::Th => format!("เข้าใจแนวคิด \"{concept}\" ได้อย่างถูกต้อง"),
    }
}

pub fn concept_needs_study(locale: Locale, concept: &str) -> String {
    match locale {
        Locale::En => format!("Study \"{concept}\" further"),
        Locale::Th => format!("ควรศึกษาเพิ่มเติมเกี่ยวกับ \"{concept}\""),
    }
}

pub fn concept_suggestion(locale: Locale, concept: &str) -> String {
    match locale {
        Locale::En => format!("Look up more about \"{concept}\" and why it matters"),
        Locale::Th => format!("ลองค้นหาข้อมูลเพิ่มเติมเกี่ยวกับ \"{concept}\" และความสำคัญของมัน"),
    }
}

pub fn reread_suggestion(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Re-read the lesson and take notes on the main concepts",
        Locale::Th => "ลองอ่านเนื้อหาอีกครั้งและจดบันทึกแนวคิดหลัก",
    }
}

pub fn mind_map_suggestion(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Draw a mind map to connect the concepts together",
        Locale::Th => "สร้างแผนผังความคิดเพื่อเชื่อมโยงแนวคิดต่างๆ",
    }
}

pub fn negation_advisory(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Check statements that show uncertainty or a possible misunderstanding",
        Locale::Th => "ตรวจสอบข้อความที่แสดงความไม่แน่ใจหรือความเข้าใจผิด",
    }
}

pub fn hedging_advisory(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Look for more information to confirm your understanding",
        Locale::Th => "ลองหาข้อมูลเพิ่มเติมเพื่อยืนยันความเข้าใจ",
    }
}

/// One message per score band, highest band first.
pub fn score_band(locale: Locale, band: usize) -> &'static str {
    const EN: [&str; 5] = [
        "Excellent! You have a deep understanding of this material.",
        "Very good! You understand most of the material, with a few gaps left to close.",
        "Good! You have a solid foundation, but some parts need more study.",
        "You understand parts of the material, but more study is needed.",
        "Re-read the lesson and write down its key concepts.",
    ];
    const TH: [&str; 5] = [
        "ยอดเยี่ยม! คุณมีความเข้าใจที่ลึกซึ้งในเนื้อหานี้",
        "ดีมาก! คุณเข้าใจเนื้อหาส่วนใหญ่แล้ว แต่ยังมีพื้นที่ที่สามารถปรับปรุงได้",
        "ดี! คุณมีความเข้าใจพื้นฐานที่ดี แต่ควรศึกษาเพิ่มเติมในบางส่วน",
        "คุณมีความเข้าใจบางส่วนแล้ว แต่ยังต้องศึกษาเพิ่มเติมมาก",
        "แนะนำให้อ่านเนื้อหาอีกครั้งและจดบันทึกแนวคิดหลัก",
    ];
    let band = band.min(EN.len() - 1);
    match locale {
        Locale::En => EN[band],
        Locale::Th => TH[band],
    }
}

pub fn detailed_explanation(
    locale: Locale,
    matched: usize,
    total: usize,
    summary: &str,
    understanding: &str,
    open_topics: usize,
) -> String {
    match locale {
        Locale::En => {
            let recommendation = if open_topics > 0 {
                format!("Study {open_topics} more topic(s) in depth")
            } else {
                "Your understanding covers the main content of the lesson".to_string()
            };
            format!(
                "Based on the analysis, you understood {matched} of {total} key concepts\n\n\
                 This lesson is about: {summary}\n\n\
                 Your understanding: \"{understanding}\"\n\n\
                 Recommendation: {recommendation}"
            )
        }
        Locale::Th => {
            let recommendation = if open_topics > 0 {
                format!("ควรศึกษาเพิ่มเติมใน {open_topics} หัวข้อ")
            } else {
                "ความเข้าใจของคุณครอบคลุมเนื้อหาหลักแล้ว".to_string()
            };
            format!(
                "จากการวิเคราะห์ความเข้าใจของคุณ พบว่าคุณเข้าใจแนวคิดหลัก {matched} จาก {total} แนวคิด\n\n\
                 เนื้อหาหลักของบทเรียนนี้เกี่ยวกับ: {summary}\n\n\
                 ความเข้าใจของคุณ: \"{understanding}\"\n\n\
                 คำแนะนำ: {recommendation}"
            )
        }
    }
}

pub fn unable_to_analyze(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Unable to analyze this answer",
        Locale::Th => "ไม่สามารถวิเคราะห์ได้",
    }
}

pub struct DegradedText {
    pub feedback: &'static str,
    pub strength: &'static str,
    pub improvement: &'static str,
    pub suggestion: &'static str,
    pub explanation: &'static str,
}

pub fn degraded(locale: Locale) -> DegradedText {
    match locale {
        Locale::En => DegradedText {
            feedback: "Something went wrong during the analysis. Please try again.",
            strength: "Made an effort to explain your understanding",
            improvement: "Try describing your understanding in more detail",
            suggestion: "Read the lesson again and write down what you understood",
            explanation: "The answer could not be analyzed because of a technical error.",
        },
        Locale::Th => DegradedText {
            feedback: "เกิดข้อผิดพลาดในการวิเคราะห์ กรุณาลองใหม่อีกครั้ง",
            strength: "พยายามแสดงความเข้าใจแล้ว",
            improvement: "ควรลองเขียนความเข้าใจให้ละเอียดมากขึ้น",
            suggestion: "ลองอ่านเนื้อหาอีกครั้งและเขียนสิ่งที่เข้าใจ",
            explanation: "ไม่สามารถวิเคราะห์ได้เนื่องจากข้อผิดพลาดทางเทคนิค",
        },
    }
}

pub fn validation_unavailable(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "This question could not be validated. Please try again.",
        Locale::Th => "ไม่สามารถตรวจสอบคำถามนี้ได้ กรุณาลองใหม่อีกครั้ง",
    }
}

pub fn understanding_too_short(locale: Locale, min_chars: usize) -> String {
    match locale {
        Locale::En => format!("Please explain your understanding in at least {min_chars} characters"),
        Locale::Th => format!("กรุณาอธิบายความเข้าใจอย่างน้อย {min_chars} ตัวอักษร"),
    }
}

pub fn no_lesson_loaded(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "No lesson is loaded. Upload a TXT lesson first.",
        Locale::Th => "ยังไม่มีบทเรียน กรุณาอัปโหลดไฟล์ TXT ก่อน",
    }
}
