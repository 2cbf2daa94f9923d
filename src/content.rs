//! 各栏目的静态内容

use chrono::{Datelike, NaiveDate};

pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
}

pub struct Article {
    pub title: &'static str,
    pub excerpt: &'static str,
    pub category: &'static str,
    pub published: Option<NaiveDate>,
}

pub struct ContactInfo {
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub hours: &'static str,
}

pub const ABOUT: [&str; 2] = [
    "Fondée en 2010, Washingtonia est née de la passion de ses fondateurs pour l'agriculture durable et l'innovation. Notre mission est d'accompagner les agriculteurs marocains dans leur transition vers des pratiques plus respectueuses de l'environnement tout en améliorant leur rentabilité.",
    "Aujourd'hui, notre équipe d'experts travaille avec passion pour promouvoir des pratiques agricoles durables et innovantes à travers tout le Maroc.",
];

pub const SERVICES_INTRO: &str = "Washingtonia propose une gamme complète de services agricoles pour répondre aux besoins spécifiques des agriculteurs et des entreprises du secteur agricole au Maroc.";

pub const SERVICES: [Service; 4] = [
    Service {
        title: "Conseil Technique",
        description: "Notre équipe d'experts vous accompagne pour optimiser vos cultures et améliorer vos rendements grâce à des conseils personnalisés.",
    },
    Service {
        title: "Mécanisation Agricole",
        description: "Nous proposons des services de travaux agricoles avec des équipements modernes et performants pour optimiser votre production.",
    },
    Service {
        title: "Formation",
        description: "Nos programmes de formation vous permettent d'acquérir les compétences nécessaires pour mettre en œuvre des techniques agricoles innovantes.",
    },
    Service {
        title: "Études & Analyses",
        description: "Nous réalisons des analyses de sol, des études de faisabilité et des diagnostics agricoles complets pour vous aider à prendre les meilleures décisions.",
    },
];

pub const BLOG_INTRO: &str = "Découvrez nos derniers articles, conseils pratiques et actualités sur l'agriculture durable et les innovations du secteur agricole au Maroc.";

pub fn articles() -> Vec<Article> {
    vec![
        Article {
            title: "Les meilleures pratiques pour une agriculture durable",
            excerpt: "Découvrez comment mettre en place des pratiques agricoles respectueuses de l'environnement tout en maintenant une bonne rentabilité.",
            category: "Agriculture Durable",
            published: NaiveDate::from_ymd_opt(2023, 4, 15),
        },
        Article {
            title: "L'impact du changement climatique sur l'agriculture au Maroc",
            excerpt: "Analyse des défis posés par le changement climatique pour les agriculteurs marocains et les solutions d'adaptation possibles.",
            category: "Climat",
            published: NaiveDate::from_ymd_opt(2023, 3, 28),
        },
    ]
}

pub const CONTACT_INTRO: &str = "Vous avez des questions ou souhaitez en savoir plus sur nos services ? N'hésitez pas à nous contacter, notre équipe se fera un plaisir de vous répondre.";

pub const CONTACT: ContactInfo = ContactInfo {
    address: "123 Avenue Mohammed V, Rabat, Maroc",
    phone: "+212 5XX XX XX XX",
    email: "contact@washingtonia.ma",
    hours: "Lundi au Vendredi, 9h-18h",
};

pub const PARTNERS_INTRO: &str = "Washingtonia collabore avec un réseau de partenaires de confiance pour offrir des solutions complètes et innovantes à nos clients.";

pub const PARTNER_COUNT: usize = 8;

const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// 法语长日期，例如 "15 avril 2023"
pub fn format_date_fr(date: NaiveDate) -> String {
    let month = MONTHS_FR[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}
