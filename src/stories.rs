/*
stories.rs

Copyright 2026 The Magic Farm contributors

This file is part of Magic Farm.

Magic Farm is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Magic Farm is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Magic Farm. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Illustrated stories, read aloud page by page.

use log::debug;
use serde::Serialize;

use crate::prompts;
use crate::services::image::encode_component;

const ILLUSTRATION_URL: &str = "https://image.pollinations.ai/prompt/";
const PAGE_STYLE: &str =
    " cute children book illustration, vector art, vibrant colors, simple shapes, high quality, detailed";
const COVER_STYLE: &str =
    " cute children book illustration, vector art, vibrant colors, simple shapes, storybook style";

/// Page of a story.
#[derive(Serialize, Debug, PartialEq)]
pub struct Scene {
    /// Text read aloud.
    pub text: &'static str,

    /// Subject of the illustration.
    pub image_keyword: &'static str,
}

impl Scene {
    /// URL of the page illustration.
    pub fn illustration_url(&self) -> String {
        illustration_url(self.image_keyword, PAGE_STYLE)
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Story {
    pub id: &'static str,
    pub title: &'static str,
    pub cover_color: &'static str,
    pub scenes: [Scene; 3],
}

impl Story {
    /// URL of the cover illustration, derived from the first page.
    pub fn cover_url(&self) -> String {
        illustration_url(self.scenes[0].image_keyword, COVER_STYLE)
    }
}

fn illustration_url(keyword: &str, style: &str) -> String {
    format!(
        "{ILLUSTRATION_URL}{}",
        encode_component(&format!("{keyword}{style}"))
    )
}

pub static STORIES: [Story; 9] = [
    Story {
        id: "1",
        title: "Yalnız Robotun Arkadaşı",
        cover_color: "#e76f51",
        scenes: [
            Scene {
                text: "Bir zamanlar, uzak bir gezegende Teneke adında küçük bir robot yaşardı. Teneke'nin hiç arkadaşı yoktu.",
                image_keyword: "cute sad robot on planet",
            },
            Scene {
                text: "Bir gün gökyüzünden parlak bir ışık düştü. Teneke merakla oraya gitti. O da ne? Küçük mavi bir kuş!",
                image_keyword: "cute robot looking at blue bird",
            },
            Scene {
                text: "Kuşun kanadı incinmişti. Teneke onu tamir etti. O günden sonra hiç ayrılmadılar ve çok mutlu oldu.",
                image_keyword: "robot and bird happy together friends",
            },
        ],
    },
    Story {
        id: "2",
        title: "Sihirli Orman",
        cover_color: "#2a9d8f",
        scenes: [
            Scene {
                text: "Kocaman ağaçların olduğu yeşil bir ormanda, yaprakların arasında saklanan minik periler vardı.",
                image_keyword: "magical forest with fairies",
            },
            Scene {
                text: "Periler geceleri ortaya çıkar, çiçeklerin üzerine sihirli tozlar serperlerdi. Her yer ışıl ışıl olurdu.",
                image_keyword: "glowing fairy dust flowers night",
            },
            Scene {
                text: "Ormana gelen çocuklar bu ışıkları görünce hayallere dalar, güzel rüyalar görürlerdi.",
                image_keyword: "happy children in magical forest",
            },
        ],
    },
    Story {
        id: "3",
        title: "Uzaylı Zıpzıp",
        cover_color: "#a2d2ff",
        scenes: [
            Scene {
                text: "Zıpzıp, mor renkli ve üç gözlü sevimli bir uzaylıydı. En sevdiği şey yıldızların üzerinde zıplamaktı.",
                image_keyword: "cute purple alien three eyes space",
            },
            Scene {
                text: "Bir gün o kadar yükseğe zıpladı ki, kendini Ay Dede'nin burnunda buldu! Ay Dede gıdıklandı.",
                image_keyword: "alien jumping on moon face cartoon",
            },
            Scene {
                text: "Zıpzıp özür diledi. Ay Dede güldü ve ona kayan bir yıldıza binip evine gitmesi için yardım etti.",
                image_keyword: "alien riding shooting star",
            },
        ],
    },
    Story {
        id: "4",
        title: "Cesur Kaplumbağa",
        cover_color: "#8da399",
        scenes: [
            Scene {
                text: "Tostos, çok yavaş yürüyen sevimli bir kaplumbağaydı. Ama en büyük hayali tepenin ardındaki gölü görmekti.",
                image_keyword: "cute turtle walking nature",
            },
            Scene {
                text: "Yolda tavşan onunla dalga geçti, 'Sen oraya asla varamazsın!' dedi. Tostos dinlemedi, yürümeye devam etti.",
                image_keyword: "turtle and rabbit cartoon",
            },
            Scene {
                text: "Güneş batarken Tostos tepeye ulaştı. Manzara harikaydı! Yavaş da olsa, vazgeçmediği için başarmıştı.",
                image_keyword: "turtle looking at beautiful lake sunset",
            },
        ],
    },
    Story {
        id: "5",
        title: "Uykucu Baykuş",
        cover_color: "#6d597a",
        scenes: [
            Scene {
                text: "Gündüzleri herkes uyanıkken, Baykuş Puki mışıl mışıl uyurdu. Gece olunca gözleri kocaman açılırdı.",
                image_keyword: "sleeping cute owl in tree day",
            },
            Scene {
                text: "Bir gece, ormanda kaybolan küçük bir sincap gördü. Sincap evini bulamıyordu ve çok korkmuştu.",
                image_keyword: "scared baby squirrel forest night",
            },
            Scene {
                text: "Puki, karanlıkta çok iyi görebildiği için sincaba yardım etti ve onu güvenle annesine götürdü.",
                image_keyword: "owl helping squirrel friends",
            },
        ],
    },
    Story {
        id: "6",
        title: "Renkli Balık",
        cover_color: "#f4a261",
        scenes: [
            Scene {
                text: "Denizin derinliklerinde, pulları gökkuşağı gibi parlayan bir balık yaşardı. Herkes ona hayranlıkla bakardı.",
                image_keyword: "rainbow colored fish underwater",
            },
            Scene {
                text: "Ama o hiç kimseyle oynamaz, pulları kirlenmesin diye hep yalnız gezerdi. Bu yüzden çok yalnızdı.",
                image_keyword: "sad colorful fish alone",
            },
            Scene {
                text: "Bir gün küçük bir balığa yardım edince neşelendi. Paylaşmanın ve arkadaşlığın güzellikten daha önemli olduğunu anladı.",
                image_keyword: "happy colorful fish playing with friends",
            },
        ],
    },
    Story {
        id: "7",
        title: "Çalışkan Karınca",
        cover_color: "#e63946",
        scenes: [
            Scene {
                text: "Yaz mevsimiydi. Ağustos böceği şarkı söylerken, Karınca Kiki durmadan buğday taşıyordu.",
                image_keyword: "cute ant carrying food cartoon",
            },
            Scene {
                text: "Kiki çok yorulmuştu ama kışın aç kalmamak için çalışması gerektiğini biliyordu. Yuvasını yiyecekle doldurdu.",
                image_keyword: "ant nest underground food",
            },
            Scene {
                text: "Kış geldiğinde kar yağdı. Kiki sıcak yuvasında yemeğini yedi ve çok mutlu oldu.",
                image_keyword: "winter snow happy ant in home",
            },
        ],
    },
    Story {
        id: "8",
        title: "Küçük Bulut",
        cover_color: "#a8dadc",
        scenes: [
            Scene {
                text: "Gökyüzünde Pamuk adında küçük beyaz bir bulut vardı. Pamuk hep aşağıya yağmur yağdırmak isterdi.",
                image_keyword: "cute happy cloud in blue sky",
            },
            Scene {
                text: "Bir gün susamış bir çiçek gördü. 'Lütfen bana su ver' dedi çiçek. Pamuk hemen kendini sıktı.",
                image_keyword: "cloud raining on thirsty flower",
            },
            Scene {
                text: "Yağmur yağınca güneş açtı ve gökyüzünde rengarenk bir gökkuşağı çıktı. Çiçek teşekkür etti.",
                image_keyword: "rainbow flowers sunny meadow",
            },
        ],
    },
    Story {
        id: "9",
        title: "Kayıp Dinozor",
        cover_color: "#bc6c25",
        scenes: [
            Scene {
                text: "Dino, ormanda oyun oynarken annesinden uzaklaştı. Etrafına baktı ama annesini göremedi.",
                image_keyword: "cute baby dinosaur lost in forest",
            },
            Scene {
                text: "Bir kelebek gördü ve onu takip etmeye başladı. Kelebek onu nehrin kenarına götürdü.",
                image_keyword: "baby dinosaur following butterfly",
            },
            Scene {
                text: "Nehrin kenarında annesi su içiyordu! Dino koşarak annesine sarıldı. Çok mutluydu.",
                image_keyword: "mother and baby dinosaur hugging happy",
            },
        ],
    },
];

/// Return the story with the given identifier.
pub fn find(id: &str) -> Option<&'static Story> {
    STORIES.iter().find(|s| s.id == id)
}

/// Result of turning a page.
#[derive(Debug, PartialEq)]
pub enum Turn {
    /// A new page is displayed. The text must be read aloud.
    Page(&'static str),

    /// The story is over and the reader is back to the list of stories. The closing phrase
    /// must be read aloud.
    Finished(&'static str),

    /// No page to turn.
    Ignored,
}

/// Story reader object.
#[derive(Debug, Default)]
pub struct StoryReader {
    story: Option<&'static Story>,
    page: usize,
}

impl StoryReader {
    /// Create a [`StoryReader`] object that displays the list of stories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Phrase read when the list of stories is displayed.
    pub fn welcome(&self) -> &'static str {
        prompts::STORY_WELCOME
    }

    /// Open a story at its first page.
    pub fn select(&mut self, id: &str) -> Turn {
        let Some(story) = find(id) else {
            return Turn::Ignored;
        };
        debug!("Reading story {}", story.title);
        self.story = Some(story);
        self.page = 0;
        Turn::Page(story.scenes[0].text)
    }

    pub fn story(&self) -> Option<&'static Story> {
        self.story
    }

    /// Index of the displayed page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Return the displayed page.
    pub fn scene(&self) -> Option<&'static Scene> {
        self.story.and_then(|s| s.scenes.get(self.page))
    }

    /// Go to the next page. Turning the last page ends the story.
    pub fn next(&mut self) -> Turn {
        let Some(story) = self.story else {
            return Turn::Ignored;
        };
        if self.page + 1 < story.scenes.len() {
            self.page += 1;
            return Turn::Page(story.scenes[self.page].text);
        }
        debug!("End of story {}", story.title);
        self.back();
        Turn::Finished(prompts::STORY_END)
    }

    /// Go to the previous page.
    pub fn previous(&mut self) -> Turn {
        match self.story {
            Some(story) if self.page > 0 => {
                self.page -= 1;
                Turn::Page(story.scenes[self.page].text)
            }
            _ => Turn::Ignored,
        }
    }

    /// Close the story and go back to the list.
    pub fn back(&mut self) {
        self.story = None;
        self.page = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stories_are_complete() {
        for (i, story) in STORIES.iter().enumerate() {
            assert_eq!(story.id, (i + 1).to_string());
            assert!(story.cover_color.starts_with('#'));
            for scene in &story.scenes {
                assert!(!scene.text.is_empty());
                assert!(!scene.image_keyword.is_empty());
            }
        }
        assert_eq!(find("9").map(|s| s.title), Some("Kayıp Dinozor"));
        assert!(find("10").is_none());
    }

    #[test]
    fn illustration_urls() {
        let story = find("1").expect("story 1");
        assert_eq!(
            story.scenes[0].illustration_url(),
            "https://image.pollinations.ai/prompt/cute%20sad%20robot%20on%20planet%20cute%20\
             children%20book%20illustration%2C%20vector%20art%2C%20vibrant%20colors%2C%20\
             simple%20shapes%2C%20high%20quality%2C%20detailed"
        );
        assert!(story.cover_url().ends_with("storybook%20style"));
    }

    #[test]
    fn reading_a_story() {
        let mut reader = StoryReader::new();
        assert_eq!(reader.next(), Turn::Ignored);
        assert_eq!(reader.select("42"), Turn::Ignored);

        let story = find("4").expect("story 4");
        assert_eq!(reader.select("4"), Turn::Page(story.scenes[0].text));
        assert_eq!(reader.previous(), Turn::Ignored);
        assert_eq!(reader.next(), Turn::Page(story.scenes[1].text));
        assert_eq!(reader.next(), Turn::Page(story.scenes[2].text));
        assert_eq!(reader.previous(), Turn::Page(story.scenes[1].text));
        assert_eq!(reader.next(), Turn::Page(story.scenes[2].text));
        assert_eq!(reader.scene(), Some(&story.scenes[2]));

        assert_eq!(reader.next(), Turn::Finished(prompts::STORY_END));
        assert!(reader.story().is_none());
        assert!(reader.scene().is_none());
    }

    #[test]
    fn back_closes_the_story() {
        let mut reader = StoryReader::new();
        reader.select("2");
        reader.next();
        reader.back();
        assert!(reader.story().is_none());
        assert_eq!(reader.page(), 0);
        assert_eq!(reader.welcome(), prompts::STORY_WELCOME);
    }
}
