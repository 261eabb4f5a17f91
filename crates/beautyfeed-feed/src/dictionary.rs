//! Static translation tables for attribute names and values.
//!
//! Suppliers mix Russian and Ukrainian spellings; the storefront filters on
//! the Ukrainian forms. Matching is exact (after trimming by the caller):
//! anything not listed passes through unchanged.

/// Canonical attribute name for a raw parameter name.
#[must_use]
pub fn translate_key(raw: &str) -> Option<&'static str> {
    let canonical = match raw {
        "Пол" | "Для кого" => "Стать",
        "Тип кожи" | "Тип шкири" => "Тип шкіри",
        "Тип волос" => "Тип волосся",
        "Объем" | "Объём" | "Обьем" => "Об'єм",
        "Вес" => "Вага",
        "Страна производитель" | "Страна-производитель" | "Страна производства" => {
            "Країна виробник"
        }
        "Страна регистрации бренда" => "Країна реєстрації бренду",
        "Назначение" => "Призначення",
        "Возраст" => "Вік",
        "Цвет" => "Колір",
        "Оттенок" => "Відтінок",
        "Класс косметики" => "Клас косметики",
        "Время применения" => "Час застосування",
        "Зона применения" => "Зона застосування",
        "Эффект" | "Действие" => "Ефект",
        "Серия" => "Серія",
        "Активные ингредиенты" => "Активні інгредієнти",
        "Состав" => "Склад",
        "Форма выпуска" => "Форма випуску",
        "Тип продукта" | "Вид продукта" => "Тип продукту",
        "Особенности" => "Особливості",
        "Степень защиты" | "SPF фактор" => "Ступінь захисту",
        "Запах" => "Аромат",
        "Бренд" | "Производитель" => "Brand",
        _ => return None,
    };
    Some(canonical)
}

/// Canonical form of a single attribute value (or one `|` segment of it).
#[must_use]
pub fn translate_value(raw: &str) -> Option<&'static str> {
    let canonical = match raw {
        // gender
        "Женский" | "Для женщин" => "Жіночий",
        "Мужской" | "Для мужчин" => "Чоловічий",
        "Унисекс" => "Унісекс",
        "Детский" | "Для детей" => "Дитячий",
        // skin and hair types
        "Сухая" => "Суха",
        "Жирная" => "Жирна",
        "Нормальная" => "Нормальна",
        "Комбинированная" => "Комбінована",
        "Чувствительная" => "Чутлива",
        "Проблемная" => "Проблемна",
        "Зрелая" => "Зріла",
        "Обезвоженная" => "Зневоднена",
        "Все типы" | "Для всех типов" | "Для всех типов кожи" => "Для всіх типів шкіри",
        "Окрашенные" => "Фарбоване",
        "Поврежденные" => "Пошкоджене",
        "Тонкие" => "Тонке",
        "Вьющиеся" => "Кучеряве",
        // time of use
        "Дневной" => "Денний",
        "Ночной" => "Нічний",
        "Универсальный" => "Універсальний",
        "Утро" | "Утром" => "Ранок",
        "Вечер" | "Вечером" => "Вечір",
        // effect
        "Увлажнение" => "Зволоження",
        "Питание" => "Живлення",
        "Очищение" => "Очищення",
        "Омоложение" | "Антивозрастной" => "Антивіковий",
        "Восстановление" => "Відновлення",
        "Защита от солнца" => "Захист від сонця",
        "Матирование" => "Матування",
        "Отбеливание" => "Відбілювання",
        "Успокаивающий" => "Заспокійливий",
        // body zones
        "Лицо" | "Для лица" => "Обличчя",
        "Тело" | "Для тела" => "Тіло",
        "Волосы" | "Для волос" => "Волосся",
        "Для рук" => "Руки",
        "Ноги" | "Для ног" => "Ноги",
        "Губы" | "Для губ" => "Губи",
        "Глаза" | "Вокруг глаз" => "Зона навколо очей",
        // cosmetics class
        "Профессиональная" => "Професійна",
        "Масс-маркет" => "Мас-маркет",
        "Аптечная" => "Аптечна",
        "Органическая" | "Натуральная" => "Натуральна",
        // countries
        "Франция" => "Франція",
        "Германия" => "Німеччина",
        "Италия" => "Італія",
        "Испания" => "Іспанія",
        "Польша" => "Польща",
        "Украина" => "Україна",
        "Южная Корея" | "Корея" => "Південна Корея",
        "Япония" => "Японія",
        "Швейцария" => "Швейцарія",
        "Великобритания" => "Великобританія",
        "Израиль" => "Ізраїль",
        // yes / no
        "Да" => "Так",
        "Нет" => "Ні",
        _ => return None,
    };
    Some(canonical)
}
