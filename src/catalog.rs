//! Static academy content: what the site shows and what the advisor knows.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseCategory {
    Kids,
    Adults,
    Ielts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearningType {
    Private,
    Group,
}

impl LearningType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningType::Private => "Private",
            LearningType::Group => "Group",
        }
    }
}

#[derive(Debug)]
pub struct Course {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: CourseCategory,
    pub features: [&'static str; 3],
}

#[derive(Debug)]
pub struct LearningFormat {
    pub kind: LearningType,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

pub const BRAND: &str = "E4All Academy";
pub const NAV_LINKS: [&str; 4] = ["الرئيسية", "الدورات", "عن الأكاديمية", "اتصل بنا"];
pub const CALL_TO_ACTION: &str = "سجل الآن";

pub const HERO_TITLE: &str = "استثمر في مستقبلك مع E4All Academy";
pub const HERO_TAGLINE: &str = "نقدم برامج تعليمية متميزة للغة الإنجليزية تناسب جميع الأعمار والمستويات، من التأسيس للأطفال حتى التميز في الآيلتس.";
pub const HERO_SOCIAL_PROOF: &str = "انضم لأكثر من 500 طالب من مختلف الفئات والأعمار";
pub const ACCREDITATION: &str = "اعتماد دولي: مناهج مطابقة للمعايير";

pub const COURSES_HEADING: &str = "برامجنا التعليمية";
pub const COURSES_SUBHEADING: &str = "نحن لا نعلم اللغة فقط، بل نفتح لك آفاقاً جديدة";

pub const COURSES: [Course; 3] = [
    Course {
        id: "kids",
        title: "الإنجليزية للأطفال",
        description: "منهج ممتع وتفاعلي مصمم خصيصاً للصغار لبناء أساس قوي في اللغة.",
        category: CourseCategory::Kids,
        features: ["تعلم من خلال اللعب", "مدرسون متخصصون", "تقارير دورية للأهل"],
    },
    Course {
        id: "adults",
        title: "الإنجليزية للكبار",
        description: "تحسين مهارات التحدث والاستماع للعمل أو السفر أو التطوير الشخصي.",
        category: CourseCategory::Adults,
        features: ["تركيز على المحادثة", "مواضيع واقعية", "أوقات مرنة"],
    },
    Course {
        id: "ielts",
        title: "تحضير اختبار IELTS",
        description: "دورة مكثفة تضمن لك الحصول على السكور المطلوب للهجرة أو الدراسة بالخارج.",
        category: CourseCategory::Ielts,
        features: ["استراتيجيات الحل", "امتحانات تجريبية", "تصحيح مهام الكتابة"],
    },
];

pub const FORMATS_HEADING: &str = "مرونة تامة في اختيار نظام الدراسة";

pub const FORMATS: [LearningFormat; 2] = [
    LearningFormat {
        kind: LearningType::Private,
        title: "جلسات فردية",
        description: "تركيز كامل بنسبة 100% على احتياجاتك الفردية ونقاط ضعفك لضمان أسرع النتائج.",
    },
    LearningFormat {
        kind: LearningType::Group,
        title: "جلسات جماعية",
        description: "تعلم وسط بيئة تفاعلية محفزة تساعدك على ممارسة المحادثة مع أقرانك بفاعلية.",
    },
];

pub const STATS: [Stat; 4] = [
    Stat {
        value: "98%",
        label: "نسبة نجاح الطلاب",
    },
    Stat {
        value: "+10",
        label: "سنوات خبرة",
    },
    Stat {
        value: "1000+",
        label: "ساعة تدريبية",
    },
    Stat {
        value: "24/7",
        label: "دعم تعليمي مستمر",
    },
];

pub const ABOUT: &str = "نهدف لتوفير أفضل تجربة لتعلم اللغة الإنجليزية في المنطقة من خلال دمج الأساليب الحديثة مع التكنولوجيا المتقدمة.";
pub const PHONE: &str = "+20 123 456 789";
pub const EMAIL: &str = "info@e4allacademy.com";
pub const ADDRESS: &str = "القاهرة، مصر";
pub const HOURS: [&str; 2] = ["السبت - الخميس: 10 ص - 10 م", "الجمعة: مغلق"];
pub const SOCIAL: [&str; 3] = ["fb", "ig", "li"];
pub const FOOTER: &str = "E4All Academy. جميع الحقوق محفوظة.";

pub const ADVISOR_TITLE: &str = "مستشار E4All الذكي";
pub const ADVISOR_SUBTITLE: &str = "متاح دائماً لمساعدتك";
pub const ADVISOR_LAUNCHER: &str = "مستشارك الذكي";
pub const INPUT_PLACEHOLDER: &str = "اسألني عن الدورات أو المستويات...";

/// Instruction sent with every advice request
pub fn system_instruction() -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "You are the course advisor for {BRAND}, an English language academy in Cairo, Egypt. "
    ));
    prompt.push_str("Help visitors pick the right course and answer questions about levels, ");
    prompt.push_str("formats and schedules. Reply in the visitor's language (usually Arabic), ");
    prompt.push_str("keep answers short and friendly, and suggest contacting the academy for ");
    prompt.push_str("details you do not know.\n\n");

    prompt.push_str("Courses:\n");
    for course in &COURSES {
        prompt.push_str(&format!(
            "- {} ({}): {} Highlights: {}.\n",
            course.title,
            course.id,
            course.description,
            course.features.join("، ")
        ));
    }

    prompt.push_str("\nLearning formats:\n");
    for format in &FORMATS {
        prompt.push_str(&format!(
            "- {} ({}): {}\n",
            format.title,
            format.kind.as_str(),
            format.description
        ));
    }

    prompt.push_str(&format!(
        "\nContact: phone {PHONE}, email {EMAIL}, address {ADDRESS}. Opening hours: {}.",
        HOURS.join("; ")
    ));

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_ids_are_unique() {
        let mut ids: Vec<&str> = COURSES.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), COURSES.len());
    }

    #[test]
    fn categories_cover_every_course() {
        let categories: Vec<CourseCategory> = COURSES.iter().map(|c| c.category).collect();
        assert_eq!(
            categories,
            vec![CourseCategory::Kids, CourseCategory::Adults, CourseCategory::Ielts]
        );
    }

    #[test]
    fn system_instruction_mentions_every_course_and_contact() {
        let prompt = system_instruction();
        for course in &COURSES {
            assert!(prompt.contains(course.title));
        }
        assert!(prompt.contains("Private"));
        assert!(prompt.contains("Group"));
        assert!(prompt.contains(EMAIL));
    }
}
