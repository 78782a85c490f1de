use anyhow::Result;
use chrono::{TimeZone, Utc};
use sqlx::PgPool;

use crate::models::{NewArticle, NewDoctor};
use crate::services::{ArticleService, DoctorService};

pub struct DatabaseSeeder {
    pool: PgPool,
}

impl DatabaseSeeder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn seed_all(&self) -> Result<()> {
        tracing::info!("Starting database seeding...");

        self.seed_doctors().await?;
        self.seed_articles().await?;

        tracing::info!("Database seeding completed!");
        Ok(())
    }

    async fn seed_doctors(&self) -> Result<()> {
        let doctor_service = DoctorService::new(self.pool.clone());

        if doctor_service.count().await? > 0 {
            return Ok(());
        }

        let doctors = vec![
            NewDoctor {
                name: "Jennifer Wilson".to_string(),
                specialty: "General Practitioner".to_string(),
                hospital: "City Community Hospital".to_string(),
                experience: 12,
                education: "Harvard Medical School".to_string(),
                rating: 4.9,
                description: "Dr. Wilson is a dedicated general practitioner with over 12 years of experience in family medicine.".to_string(),
                languages: vec!["English".to_string(), "Spanish".to_string()],
            },
            NewDoctor {
                name: "Michael Chen".to_string(),
                specialty: "Cardiologist".to_string(),
                hospital: "Heart & Vascular Institute".to_string(),
                experience: 15,
                education: "Stanford University School of Medicine".to_string(),
                rating: 4.8,
                description: "Dr. Chen specializes in treating cardiovascular diseases with a patient-centered approach.".to_string(),
                languages: vec!["English".to_string(), "Mandarin".to_string()],
            },
            NewDoctor {
                name: "Sarah Johnson".to_string(),
                specialty: "Dermatologist".to_string(),
                hospital: "Skin Health Center".to_string(),
                experience: 10,
                education: "Johns Hopkins University".to_string(),
                rating: 4.7,
                description: "Dr. Johnson is an expert in treating a wide range of skin conditions and performing cosmetic procedures.".to_string(),
                languages: vec!["English".to_string()],
            },
            NewDoctor {
                name: "David Rodriguez".to_string(),
                specialty: "Neurologist".to_string(),
                hospital: "Brain & Spine Center".to_string(),
                experience: 18,
                education: "Yale School of Medicine".to_string(),
                rating: 4.9,
                description: "Dr. Rodriguez is a leading neurologist specializing in headache disorders and multiple sclerosis.".to_string(),
                languages: vec!["English".to_string(), "Spanish".to_string(), "Portuguese".to_string()],
            },
            NewDoctor {
                name: "Emily Patel".to_string(),
                specialty: "Pediatrician".to_string(),
                hospital: "Children's Health Center".to_string(),
                experience: 8,
                education: "University of Pennsylvania".to_string(),
                rating: 4.8,
                description: "Dr. Patel is passionate about children's health and provides comprehensive pediatric care.".to_string(),
                languages: vec!["English".to_string(), "Hindi".to_string()],
            },
            NewDoctor {
                name: "Robert Thompson".to_string(),
                specialty: "Orthopedist".to_string(),
                hospital: "Sports Medicine & Orthopedic Center".to_string(),
                experience: 14,
                education: "Columbia University".to_string(),
                rating: 4.6,
                description: "Dr. Thompson specializes in sports injuries and joint replacements with minimally invasive techniques.".to_string(),
                languages: vec!["English".to_string()],
            },
            NewDoctor {
                name: "Lisa Kim".to_string(),
                specialty: "Gynecologist".to_string(),
                hospital: "Women's Health Institute".to_string(),
                experience: 11,
                education: "University of California, San Francisco".to_string(),
                rating: 4.9,
                description: "Dr. Kim provides comprehensive women's health services with a focus on preventative care.".to_string(),
                languages: vec!["English".to_string(), "Korean".to_string()],
            },
            NewDoctor {
                name: "James Williams".to_string(),
                specialty: "Psychiatrist".to_string(),
                hospital: "Mental Health Center".to_string(),
                experience: 16,
                education: "Duke University School of Medicine".to_string(),
                rating: 4.7,
                description: "Dr. Williams specializes in mood disorders and utilizes evidence-based approaches to mental health.".to_string(),
                languages: vec!["English".to_string()],
            },
        ];

        for doctor in doctors {
            doctor_service.create(doctor).await?;
        }
        tracing::info!("Seeded sample doctors");

        Ok(())
    }

    async fn seed_articles(&self) -> Result<()> {
        let article_service = ArticleService::new(self.pool.clone());

        if article_service.count().await? > 0 {
            return Ok(());
        }

        let articles = vec![
            NewArticle {
                title: "10 Ways to Improve Heart Health".to_string(),
                category: "Cardio".to_string(),
                read_time: "5 min read".to_string(),
                content: "Heart disease is the leading cause of death globally. This article explores evidence-based strategies to improve cardiovascular health, including regular exercise, a heart-healthy diet, stress management, and regular check-ups.".to_string(),
                author: "Dr. Michael Chen".to_string(),
                published_date: Utc.with_ymd_and_hms(2023, 11, 1, 0, 0, 0).unwrap(),
            },
            NewArticle {
                title: "The Benefits of Mediterranean Diet".to_string(),
                category: "Nutrition".to_string(),
                read_time: "7 min read".to_string(),
                content: "The Mediterranean diet is consistently ranked as one of the healthiest dietary patterns. Learn about its key components, health benefits, and how to incorporate it into your daily meals for better health outcomes.".to_string(),
                author: "Emma Wilson, RD".to_string(),
                published_date: Utc.with_ymd_and_hms(2023, 11, 5, 0, 0, 0).unwrap(),
            },
            NewArticle {
                title: "How to Maintain Exercise Motivation".to_string(),
                category: "Fitness".to_string(),
                read_time: "4 min read".to_string(),
                content: "Starting an exercise routine is one thing, but maintaining it is another challenge. This article provides practical strategies to stay motivated, overcome common obstacles, and make physical activity a consistent part of your lifestyle.".to_string(),
                author: "Mark Johnson, CPT".to_string(),
                published_date: Utc.with_ymd_and_hms(2023, 11, 10, 0, 0, 0).unwrap(),
            },
            NewArticle {
                title: "Understanding Anxiety: Causes and Coping Strategies".to_string(),
                category: "Mental Health".to_string(),
                read_time: "8 min read".to_string(),
                content: "Anxiety disorders affect millions of people worldwide. This article explains the different types of anxiety, their symptoms, and provides evidence-based strategies for managing anxiety in daily life.".to_string(),
                author: "Dr. James Williams".to_string(),
                published_date: Utc.with_ymd_and_hms(2023, 11, 15, 0, 0, 0).unwrap(),
            },
            NewArticle {
                title: "Sleep Better Tonight: Science-Backed Tips".to_string(),
                category: "Wellness".to_string(),
                read_time: "6 min read".to_string(),
                content: "Quality sleep is essential for physical and mental health. Discover practical, science-backed tips to improve your sleep hygiene, create an optimal sleep environment, and develop habits that promote restful sleep.".to_string(),
                author: "Dr. Jennifer Wilson".to_string(),
                published_date: Utc.with_ymd_and_hms(2023, 11, 20, 0, 0, 0).unwrap(),
            },
        ];

        for article in articles {
            article_service.create(article).await?;
        }
        tracing::info!("Seeded sample articles");

        Ok(())
    }
}
